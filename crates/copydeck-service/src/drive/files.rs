//! Create, list and delete files addressed by folder path.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use copydeck_core::error::AppError;
use copydeck_core::result::AppResult;
use copydeck_core::traits::{DriveItem, DriveStore, ListQuery, NewFile, NewFolder};
use copydeck_entity::drive::{
    CreatedFile, CreatedFolder, DEFAULT_FILE_DESCRIPTION, DEFAULT_FILE_MIME,
    DEFAULT_FOLDER_DESCRIPTION, DeletedFile, FolderContents, FolderList, FolderLocation, join_path,
};
use copydeck_entity::path::PathResolution;

use crate::context::WorkspaceContext;
use crate::path::{PathMaterializer, PathResolver};

/// A file to create under a folder path.
#[derive(Debug, Clone)]
pub struct NewPathFile {
    pub name: String,
    pub content: Bytes,
    /// Defaults to `text/plain`.
    pub mime_type: Option<String>,
    pub description: Option<String>,
    /// Target folder. Root when absent.
    pub folder_path: Option<String>,
}

/// File operations on top of the resolver and materializer.
#[derive(Debug, Clone)]
pub struct DriveFileService {
    store: Arc<dyn DriveStore>,
    resolver: PathResolver,
    materializer: PathMaterializer,
}

impl DriveFileService {
    pub fn new(store: Arc<dyn DriveStore>, resolver: PathResolver, materializer: PathMaterializer) -> Self {
        Self {
            store,
            resolver,
            materializer,
        }
    }

    /// Create a file in an existing folder path.
    pub async fn create_file_in_path(&self, ctx: &WorkspaceContext, file: NewPathFile) -> AppResult<CreatedFile> {
        validate_name(&file.name, "Valid file name is required")?;
        let target = self.resolver.resolve(ctx, file.folder_path.as_deref()).await?;
        if !target.exists {
            return Err(AppError::not_found(format!(
                "Target folder path '{}' does not exist",
                target.path
            )));
        }
        self.create_in(ctx, file, location(&target)).await
    }

    /// Create a file, creating any missing folders on its path first.
    pub async fn create_file_with_path(&self, ctx: &WorkspaceContext, file: NewPathFile) -> AppResult<CreatedFile> {
        validate_name(&file.name, "Valid file name is required")?;
        let ensured = self.materializer.ensure(ctx, file.folder_path.as_deref()).await?;
        let folder = FolderLocation {
            id: ensured.folder_id,
            path: ensured.path,
        };
        let mut created = self.create_in(ctx, file, folder).await?;
        created.created_folders = ensured.created_folders;
        Ok(created)
    }

    async fn create_in(
        &self,
        ctx: &WorkspaceContext,
        file: NewPathFile,
        folder: FolderLocation,
    ) -> AppResult<CreatedFile> {
        let mime = file
            .mime_type
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILE_MIME.to_string());
        let description = file
            .description
            .unwrap_or_else(|| DEFAULT_FILE_DESCRIPTION.to_string());

        let item = self
            .store
            .create_file(NewFile::new(&file.name, &folder.id, mime, file.content).with_description(description))
            .await?;

        info!(
            workspace = %ctx.root(),
            file_id = %item.id,
            name = %item.name,
            path = %folder.path,
            "File created"
        );
        Ok(CreatedFile::new(&item, folder))
    }

    /// Create a folder inside an existing parent path.
    pub async fn create_folder_in_path(
        &self,
        ctx: &WorkspaceContext,
        name: &str,
        parent_path: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<CreatedFolder> {
        let name = name.trim();
        validate_name(name, "Folder name is required")?;
        let parent = self.resolver.resolve(ctx, parent_path).await?;
        if !parent.exists {
            return Err(AppError::not_found(format!(
                "Parent folder path '{}' does not exist",
                parent.path
            )));
        }

        let item = self
            .store
            .create_folder(
                NewFolder::new(name, &parent.folder_id)
                    .with_description(description.unwrap_or(DEFAULT_FOLDER_DESCRIPTION)),
            )
            .await?;

        let full_path = join_path(&parent.path, name);
        info!(workspace = %ctx.root(), folder_id = %item.id, path = %full_path, "Folder created");
        Ok(CreatedFolder {
            id: item.id,
            name: item.name,
            link: item.web_view_link,
            created_time: item.created_time,
            parent_folder_id: parent.folder_id,
            parent_folder_path: parent.path,
            full_path,
        })
    }

    /// Every child of the folder at `path`, ordered by name.
    pub async fn list_folder_contents(&self, ctx: &WorkspaceContext, path: Option<&str>) -> AppResult<FolderContents> {
        let folder = self.existing_folder(ctx, path).await?;
        let contents = self
            .store
            .list(&ListQuery::children(&folder.id).ordered_by_name())
            .await?;
        Ok(FolderContents { folder, contents })
    }

    /// Every child of the workspace root, ordered by name.
    pub async fn list_root_contents(&self, ctx: &WorkspaceContext) -> AppResult<FolderContents> {
        self.list_folder_contents(ctx, None).await
    }

    /// Non-folder children of the workspace root, ordered by name.
    pub async fn list_root_files(&self, ctx: &WorkspaceContext) -> AppResult<Vec<DriveItem>> {
        self.store
            .list(&ListQuery::children(ctx.root()).files().ordered_by_name())
            .await
    }

    /// Sub-folders of the folder at `path`, ordered by name.
    pub async fn get_folders_in_path(&self, ctx: &WorkspaceContext, path: Option<&str>) -> AppResult<FolderList> {
        let folder = self.existing_folder(ctx, path).await?;
        let folders = self
            .store
            .list(&ListQuery::children(&folder.id).folders().ordered_by_name())
            .await?;
        Ok(FolderList {
            folder,
            count: folders.len(),
            folders,
        })
    }

    /// Delete a file by id, after checking it exists and may be deleted.
    pub async fn delete_file(&self, ctx: &WorkspaceContext, file_id: &str) -> AppResult<DeletedFile> {
        let file_id = file_id.trim();
        validate_name(file_id, "Valid file ID is required")?;

        let item = self.store.get(file_id).await?;
        if !item.can_delete {
            return Err(AppError::authorization(format!(
                "Permission denied: cannot delete '{}'",
                item.name
            )));
        }

        self.store.delete(&item.id).await?;
        info!(workspace = %ctx.root(), file_id = %item.id, name = %item.name, "File deleted");
        Ok(DeletedFile::from(&item))
    }

    /// Delete the single file named `file_name` in the folder at `folder_path`.
    pub async fn delete_file_by_path(
        &self,
        ctx: &WorkspaceContext,
        file_name: &str,
        folder_path: Option<&str>,
    ) -> AppResult<DeletedFile> {
        let file_name = file_name.trim();
        validate_name(file_name, "Valid file name is required")?;

        let folder = self.existing_folder(ctx, folder_path).await?;
        let mut matches = self
            .store
            .list(&ListQuery::children(&folder.id).named(file_name).files())
            .await?;

        let shown = if folder.path == "/" { "root" } else { folder.path.as_str() };
        let item = match matches.len() {
            0 => {
                return Err(AppError::not_found(format!(
                    "File '{file_name}' not found in {shown}"
                )));
            }
            1 => matches.remove(0),
            _ => {
                return Err(AppError::ambiguous(format!(
                    "Multiple files found with name '{file_name}' in {shown}. \
                     Please use file ID for deletion."
                )));
            }
        };

        let mut deleted = self.delete_file(ctx, &item.id).await?;
        deleted.path = Some(folder.path);
        Ok(deleted)
    }

    async fn existing_folder(&self, ctx: &WorkspaceContext, path: Option<&str>) -> AppResult<FolderLocation> {
        let resolved = self.resolver.resolve(ctx, path).await?;
        if !resolved.exists {
            return Err(AppError::not_found(format!(
                "Folder path '{}' does not exist",
                resolved.path
            )));
        }
        Ok(location(&resolved))
    }
}

fn location(resolved: &PathResolution) -> FolderLocation {
    FolderLocation {
        id: resolved.folder_id.clone(),
        path: resolved.path.clone(),
    }
}

fn validate_name(value: &str, message: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(message));
    }
    Ok(())
}
