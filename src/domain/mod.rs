pub mod common;
pub mod education;
pub mod experience;
pub mod form;
pub mod personal;
pub mod reference;
pub mod skill;
pub mod timeline;

pub use common::{Choice, ChoiceError};
pub use education::{Certificate, Education, EducationPatch};
pub use experience::{EmploymentType, Experience, ExperiencePatch};
pub use form::FormData;
pub use personal::{EducationLevel, Gender, Location, PersonalInfo, PersonalInfoPatch};
pub use reference::{Reference, ReferencePatch};
pub use skill::{Skill, SkillPatch, PREDEFINED_SKILLS};
