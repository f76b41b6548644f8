//! Repository pattern for database operations
//!
//! Provides a clean interface for all data access operations. Every
//! method acquires the shared connection from the lifecycle handle, so
//! the first operation after startup establishes the connection and all
//! later operations reuse it.

use crate::db::models::*;
use crate::db::Db;
use crate::errors::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select,
};
use std::sync::Arc;
use uuid::Uuid;

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    db: Arc<Db>,
}

impl Repository {
    /// Create a new repository over the shared connection handle
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }

    async fn conn(&self) -> Result<&DatabaseConnection> {
        self.db.acquire().await
    }

    // ========================================================================
    // Health Check
    // ========================================================================

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.db.ping().await
    }

    // ========================================================================
    // Profile Operations (singleton)
    // ========================================================================

    /// Get the singleton profile, if one has been written yet
    pub async fn get_profile(&self) -> Result<Option<Profile>> {
        ProfileEntity::find()
            .filter(ProfileColumn::Slot.eq(PROFILE_SLOT))
            .one(self.conn().await?)
            .await
            .map_err(Into::into)
    }

    /// Upsert the singleton profile.
    ///
    /// The unique index on `slot` turns a second create into an update,
    /// so exactly one row exists no matter how writes interleave.
    pub async fn upsert_profile(&self, model: ProfileActiveModel) -> Result<Profile> {
        ProfileEntity::insert(model)
            .on_conflict(
                OnConflict::column(ProfileColumn::Slot)
                    .update_columns([
                        ProfileColumn::Name,
                        ProfileColumn::Title,
                        ProfileColumn::Email,
                        ProfileColumn::Phone,
                        ProfileColumn::Office,
                        ProfileColumn::Biography,
                        ProfileColumn::Education,
                        ProfileColumn::ResearchInterests,
                        ProfileColumn::SocialLinks,
                        ProfileColumn::ImageObjectId,
                        ProfileColumn::Taglines,
                        ProfileColumn::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(self.conn().await?)
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // Publication Operations
    // ========================================================================

    fn publications_newest_first() -> Select<PublicationEntity> {
        PublicationEntity::find().order_by_desc(PublicationColumn::Year)
    }

    /// List all publications, newest year first
    pub async fn list_publications(&self) -> Result<Vec<Publication>> {
        Self::publications_newest_first()
            .all(self.conn().await?)
            .await
            .map_err(Into::into)
    }

    /// Find publication by ID
    pub async fn find_publication_by_id(&self, id: Uuid) -> Result<Option<Publication>> {
        PublicationEntity::find_by_id(id)
            .one(self.conn().await?)
            .await
            .map_err(Into::into)
    }

    /// Insert a new publication
    pub async fn insert_publication(&self, model: PublicationActiveModel) -> Result<Publication> {
        model.insert(self.conn().await?).await.map_err(Into::into)
    }

    /// Update an existing publication
    pub async fn update_publication(&self, model: PublicationActiveModel) -> Result<Publication> {
        model.update(self.conn().await?).await.map_err(Into::into)
    }

    /// Delete publication by ID
    pub async fn delete_publication(&self, id: Uuid) -> Result<bool> {
        let result = PublicationEntity::delete_by_id(id)
            .exec(self.conn().await?)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Which of the given publication ids do not exist
    pub async fn missing_publication_ids(&self, ids: &[Uuid]) -> Result<Vec<Uuid>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let found: Vec<Uuid> = PublicationEntity::find()
            .filter(PublicationColumn::Id.is_in(ids.iter().copied()))
            .all(self.conn().await?)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        Ok(ids.iter().filter(|id| !found.contains(id)).copied().collect())
    }

    // ========================================================================
    // Project Operations
    // ========================================================================

    fn projects_in_display_order() -> Select<ProjectEntity> {
        ProjectEntity::find().order_by_asc(ProjectColumn::DisplayOrder)
    }

    /// List all projects in display order
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        Self::projects_in_display_order()
            .all(self.conn().await?)
            .await
            .map_err(Into::into)
    }

    /// Find project by ID
    pub async fn find_project_by_id(&self, id: Uuid) -> Result<Option<Project>> {
        ProjectEntity::find_by_id(id)
            .one(self.conn().await?)
            .await
            .map_err(Into::into)
    }

    /// Insert a new project
    pub async fn insert_project(&self, model: ProjectActiveModel) -> Result<Project> {
        model.insert(self.conn().await?).await.map_err(Into::into)
    }

    /// Update an existing project
    pub async fn update_project(&self, model: ProjectActiveModel) -> Result<Project> {
        model.update(self.conn().await?).await.map_err(Into::into)
    }

    /// Delete project by ID
    pub async fn delete_project(&self, id: Uuid) -> Result<bool> {
        let result = ProjectEntity::delete_by_id(id)
            .exec(self.conn().await?)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Which of the given project ids do not exist
    pub async fn missing_project_ids(&self, ids: &[Uuid]) -> Result<Vec<Uuid>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let found: Vec<Uuid> = ProjectEntity::find()
            .filter(ProjectColumn::Id.is_in(ids.iter().copied()))
            .all(self.conn().await?)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        Ok(ids.iter().filter(|id| !found.contains(id)).copied().collect())
    }

    // ========================================================================
    // Course Operations
    // ========================================================================

    fn courses_in_display_order() -> Select<CourseEntity> {
        CourseEntity::find().order_by_asc(CourseColumn::DisplayOrder)
    }

    /// List all courses in display order
    pub async fn list_courses(&self) -> Result<Vec<Course>> {
        Self::courses_in_display_order()
            .all(self.conn().await?)
            .await
            .map_err(Into::into)
    }

    /// Find course by ID
    pub async fn find_course_by_id(&self, id: Uuid) -> Result<Option<Course>> {
        CourseEntity::find_by_id(id)
            .one(self.conn().await?)
            .await
            .map_err(Into::into)
    }

    /// Insert a new course
    pub async fn insert_course(&self, model: CourseActiveModel) -> Result<Course> {
        model.insert(self.conn().await?).await.map_err(Into::into)
    }

    /// Update an existing course
    pub async fn update_course(&self, model: CourseActiveModel) -> Result<Course> {
        model.update(self.conn().await?).await.map_err(Into::into)
    }

    /// Delete course by ID
    pub async fn delete_course(&self, id: Uuid) -> Result<bool> {
        let result = CourseEntity::delete_by_id(id)
            .exec(self.conn().await?)
            .await?;
        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Award Operations
    // ========================================================================

    fn awards_newest_first() -> Select<AwardEntity> {
        AwardEntity::find().order_by_desc(AwardColumn::Year)
    }

    /// List all awards, newest year first
    pub async fn list_awards(&self) -> Result<Vec<Award>> {
        Self::awards_newest_first()
            .all(self.conn().await?)
            .await
            .map_err(Into::into)
    }

    /// Find award by ID
    pub async fn find_award_by_id(&self, id: Uuid) -> Result<Option<Award>> {
        AwardEntity::find_by_id(id)
            .one(self.conn().await?)
            .await
            .map_err(Into::into)
    }

    /// Insert a new award
    pub async fn insert_award(&self, model: AwardActiveModel) -> Result<Award> {
        model.insert(self.conn().await?).await.map_err(Into::into)
    }

    /// Update an existing award
    pub async fn update_award(&self, model: AwardActiveModel) -> Result<Award> {
        model.update(self.conn().await?).await.map_err(Into::into)
    }

    /// Delete award by ID
    pub async fn delete_award(&self, id: Uuid) -> Result<bool> {
        let result = AwardEntity::delete_by_id(id)
            .exec(self.conn().await?)
            .await?;
        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Student Operations
    // ========================================================================

    fn students_by_name() -> Select<StudentEntity> {
        StudentEntity::find().order_by_asc(StudentColumn::Name)
    }

    /// List all students by name
    pub async fn list_students(&self) -> Result<Vec<Student>> {
        Self::students_by_name()
            .all(self.conn().await?)
            .await
            .map_err(Into::into)
    }

    /// Find student by ID
    pub async fn find_student_by_id(&self, id: Uuid) -> Result<Option<Student>> {
        StudentEntity::find_by_id(id)
            .one(self.conn().await?)
            .await
            .map_err(Into::into)
    }

    /// Insert a new student
    pub async fn insert_student(&self, model: StudentActiveModel) -> Result<Student> {
        model.insert(self.conn().await?).await.map_err(Into::into)
    }

    /// Update an existing student
    pub async fn update_student(&self, model: StudentActiveModel) -> Result<Student> {
        model.update(self.conn().await?).await.map_err(Into::into)
    }

    /// Delete student by ID
    pub async fn delete_student(&self, id: Uuid) -> Result<bool> {
        let result = StudentEntity::delete_by_id(id)
            .exec(self.conn().await?)
            .await?;
        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Blob Operations
    // ========================================================================

    /// Insert a blob metadata record
    pub async fn insert_blob_object(&self, model: BlobObjectActiveModel) -> Result<BlobObject> {
        model.insert(self.conn().await?).await.map_err(Into::into)
    }

    /// Find blob metadata by ID
    pub async fn find_blob_object(&self, id: Uuid) -> Result<Option<BlobObject>> {
        BlobObjectEntity::find_by_id(id)
            .one(self.conn().await?)
            .await
            .map_err(Into::into)
    }

    /// Insert one chunk of a blob
    pub async fn insert_blob_chunk(&self, model: BlobChunkActiveModel) -> Result<()> {
        model.insert(self.conn().await?).await?;
        Ok(())
    }

    fn chunks_in_index_order(object_id: Uuid) -> Select<BlobChunkEntity> {
        BlobChunkEntity::find()
            .filter(BlobChunkColumn::ObjectId.eq(object_id))
            .order_by_asc(BlobChunkColumn::ChunkIndex)
    }

    /// Get all chunks of a blob in ascending index order
    pub async fn list_blob_chunks(&self, object_id: Uuid) -> Result<Vec<BlobChunk>> {
        Self::chunks_in_index_order(object_id)
            .all(self.conn().await?)
            .await
            .map_err(Into::into)
    }

    /// Count the chunks associated with a blob
    pub async fn count_blob_chunks(&self, object_id: Uuid) -> Result<u64> {
        BlobChunkEntity::find()
            .filter(BlobChunkColumn::ObjectId.eq(object_id))
            .count(self.conn().await?)
            .await
            .map_err(Into::into)
    }

    /// Delete every chunk associated with a blob; returns rows removed
    pub async fn delete_blob_chunks(&self, object_id: Uuid) -> Result<u64> {
        let result = BlobChunkEntity::delete_many()
            .filter(BlobChunkColumn::ObjectId.eq(object_id))
            .exec(self.conn().await?)
            .await?;
        Ok(result.rows_affected)
    }

    /// Delete blob metadata by ID
    pub async fn delete_blob_object(&self, id: Uuid) -> Result<bool> {
        let result = BlobObjectEntity::delete_by_id(id)
            .exec(self.conn().await?)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, QueryTrait};

    fn sql<E: EntityTrait>(select: Select<E>) -> String {
        select.build(DatabaseBackend::Postgres).to_string()
    }

    #[test]
    fn publications_and_awards_list_newest_year_first() {
        assert!(sql(Repository::publications_newest_first())
            .ends_with(r#"ORDER BY "publications"."year" DESC"#));
        assert!(sql(Repository::awards_newest_first())
            .ends_with(r#"ORDER BY "awards"."year" DESC"#));
    }

    #[test]
    fn courses_and_projects_list_in_display_order() {
        assert!(sql(Repository::courses_in_display_order())
            .ends_with(r#"ORDER BY "courses"."display_order" ASC"#));
        assert!(sql(Repository::projects_in_display_order())
            .ends_with(r#"ORDER BY "projects"."display_order" ASC"#));
    }

    #[test]
    fn students_list_by_name() {
        assert!(sql(Repository::students_by_name()).ends_with(r#"ORDER BY "students"."name" ASC"#));
    }

    #[test]
    fn blob_chunks_read_in_index_order() {
        assert!(sql(Repository::chunks_in_index_order(Uuid::nil()))
            .ends_with(r#"ORDER BY "blob_chunks"."chunk_index" ASC"#));
    }
}
