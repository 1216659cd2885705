pub mod resume;

pub use resume::{Education, Experience, PersonalInfo, Resume, ResumeRecord, ResumeRow};
