use std::{env, process, sync::Arc};

use jobapp_core::{
    config::ConfigManager,
    init,
    storage::JsonFileStore,
    store::FieldStore,
    time::SystemClock,
    validation::{self, ErrorTree},
    wizard::{Step, WizardController},
};

fn main() {
    init();

    match run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}

fn run() -> Result<i32, Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        print_usage();
        return Ok(2);
    };

    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    let backend = JsonFileStore::new(config.storage_dir(manager.base_dir()))?;
    let store = FieldStore::open(Box::new(backend), Arc::new(SystemClock), &config);
    let mut wizard = WizardController::new(store, &config);

    match command.as_str() {
        "status" => {
            let store = wizard.store();
            let data = store.data();
            println!("{}", store.current_step());
            println!("Furthest step: {}", store.furthest_step().number());
            println!("Experiences: {}", data.experiences.len());
            println!("Education: {}", data.education.len());
            println!("Skills: {}", data.skills.len());
            println!("References: {}", data.references.len());
            println!("Terms agreed: {}", if data.terms_agreed { "yes" } else { "no" });
        }
        "validate" => {
            let step = match args.next() {
                Some(raw) => match raw.parse::<u8>().ok().and_then(Step::from_number) {
                    Some(step) => step,
                    None => {
                        eprintln!("Unknown step `{raw}`; expected 1-7");
                        return Ok(2);
                    }
                },
                None => wizard.current_step(),
            };
            match validation::validate(step, wizard.store().data(), &wizard.context()) {
                Ok(()) => println!("{step}: valid"),
                Err(errors) => {
                    print_errors(step, &errors)?;
                    return Ok(1);
                }
            }
        }
        "summary" => {
            for line in wizard.summary().render_lines() {
                println!("{line}");
            }
        }
        "reset" => {
            wizard.store_mut().reset_form();
            println!("Form reset");
        }
        _ => {
            print_usage();
            return Ok(2);
        }
    }

    Ok(0)
}

fn print_errors(step: Step, errors: &ErrorTree) -> Result<(), serde_json::Error> {
    println!("{step}: {} error(s)", errors.count());
    println!("{}", serde_json::to_string_pretty(errors)?);
    Ok(())
}

fn print_usage() {
    eprintln!(
        "Usage: jobapp_cli <command>\n\
         Commands:\n  \
         status\n  \
         validate [step]\n  \
         summary\n  \
         reset"
    );
}
