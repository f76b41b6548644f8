//! SeaORM entity models
//!
//! Database entities for the Lectern portfolio backend

mod award;
mod blob_chunk;
mod blob_object;
mod course;
pub mod fields;
mod profile;
mod project;
mod publication;
mod student;

pub use fields::{EducationEntry, EducationList, SocialLink, SocialLinks, StringList, UuidList};

pub use profile::{
    Entity as ProfileEntity,
    Model as Profile,
    ActiveModel as ProfileActiveModel,
    Column as ProfileColumn,
    PROFILE_SLOT,
};

pub use publication::{
    Entity as PublicationEntity,
    Model as Publication,
    ActiveModel as PublicationActiveModel,
    Column as PublicationColumn,
    PublicationCategory,
};

pub use project::{
    Entity as ProjectEntity,
    Model as Project,
    ActiveModel as ProjectActiveModel,
    Column as ProjectColumn,
    ProjectCategory,
    ProjectStatus,
};

pub use course::{
    Entity as CourseEntity,
    Model as Course,
    ActiveModel as CourseActiveModel,
    Column as CourseColumn,
    CourseLevel,
    Semester,
};

pub use award::{
    Entity as AwardEntity,
    Model as Award,
    ActiveModel as AwardActiveModel,
    Column as AwardColumn,
};

pub use student::{
    Entity as StudentEntity,
    Model as Student,
    ActiveModel as StudentActiveModel,
    Column as StudentColumn,
    StudentCategory,
};

pub use blob_object::{
    Entity as BlobObjectEntity,
    Model as BlobObject,
    ActiveModel as BlobObjectActiveModel,
    Column as BlobObjectColumn,
};

pub use blob_chunk::{
    Entity as BlobChunkEntity,
    Model as BlobChunk,
    ActiveModel as BlobChunkActiveModel,
    Column as BlobChunkColumn,
};
