//! Diesel schema for version persistence.

diesel::table! {
    /// One version counter per project and branch identifier.
    versions (id) {
        /// Storage identifier.
        id -> Int8,
        /// Owning project.
        project_id -> Int8,
        /// Branch identifier, unique within a project.
        #[max_length = 200]
        identifier_name -> Varchar,
        /// Dotted four-component release number.
        #[max_length = 100]
        release_number -> Varchar,
        /// Optional display metadata.
        #[max_length = 200]
        meta -> Nullable<Varchar>,
        /// Timestamp of the last successful write.
        last_updated -> Timestamptz,
        /// Optimistic-lock stamp, regenerated on every write.
        concurrency_token -> Uuid,
    }
}
