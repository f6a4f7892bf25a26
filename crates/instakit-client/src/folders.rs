//! Folder endpoints of the Full API

use instakit_core::{
    domain::{ApiRecord, FolderRecord},
    ports::HttpTransport,
};
use tracing::info;

use crate::{bookmarks::first_of, ApiError, FullClient};

impl<T: HttpTransport> FullClient<T> {
    /// Lists the account's user-created folders
    pub async fn list_folders(&self) -> Result<Vec<FolderRecord>, ApiError> {
        let records = self.execute_records(self.request("/api/1/folders/list")).await?;
        Ok(folders_of(records))
    }

    /// Creates a folder.
    ///
    /// Fails with [`ApiError::ResourceConflict`] if a folder with the same
    /// title already exists.
    pub async fn create_folder(&self, title: &str) -> Result<FolderRecord, ApiError> {
        let request = self.request("/api/1/folders/add").param("title", title);
        let records = self.execute_records(request).await?;
        let folder = first_of(records, ApiRecord::into_folder, "folder")?;
        info!(folder_id = %folder.folder_id, "Folder created");
        Ok(folder)
    }

    /// Deletes a folder and moves its bookmarks to the archive
    pub async fn delete_folder(&self, folder_id: &str) -> Result<(), ApiError> {
        let request = self
            .request("/api/1/folders/delete")
            .param("folder_id", folder_id);
        self.execute_records(request).await?;
        info!(folder_id, "Folder deleted");
        Ok(())
    }

    /// Reorders folders. Each entry is `(folder_id, position)`.
    ///
    /// Folders left out keep their position. Returns the full folder list.
    pub async fn set_folder_order(
        &self,
        order: &[(String, i64)],
    ) -> Result<Vec<FolderRecord>, ApiError> {
        let order = order
            .iter()
            .map(|(id, position)| format!("{}:{}", id, position))
            .collect::<Vec<_>>()
            .join(",");

        let request = self
            .request("/api/1/folders/set_order")
            .param("order", order);
        let records = self.execute_records(request).await?;
        Ok(folders_of(records))
    }
}

fn folders_of(records: Vec<ApiRecord>) -> Vec<FolderRecord> {
    records.into_iter().filter_map(ApiRecord::into_folder).collect()
}
