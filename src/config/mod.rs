//! Configuration module

mod site;

pub use site::BlogConfig;
pub use site::ContactConfig;
pub use site::HeroConfig;
pub use site::MenuItem;
pub use site::ProjectsConfig;
pub use site::SiteConfig;
pub use site::Skill;
pub use site::SkillLevel;
pub use site::SocialLink;
pub use site::SubjectOption;
