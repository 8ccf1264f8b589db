//! Campaign value objects: build requests, build results, and reader views.

pub mod result;
pub mod spec;
pub mod view;

pub use result::{
    CampaignResult, ChannelFolder, FolderRef, ItemOutcome, OutcomeSource, TouchpointFolder,
    UploadOutcome, UploadSource, UploadedFile,
};
pub use spec::{BlobRef, CampaignSpec, ChannelSpec, FileUpload, TouchpointSpec};
pub use view::{
    CampaignSummary, CampaignView, ChannelContent, ChannelView, ContentFile, FolderView,
    NamedRef, TextFile, TouchpointContent,
};

/// Name of the reserved per-campaign folder holding uploads and exports.
pub const DATA_FOLDER_NAME: &str = "Data";

/// Name of the shared workspace folder that is never listed as a campaign.
pub const GLOBAL_FOLDER_NAME: &str = "Global";

/// Whether a child folder of a campaign is the reserved data folder.
pub fn is_data_folder(name: &str) -> bool {
    name.eq_ignore_ascii_case(DATA_FOLDER_NAME)
}

/// Whether a workspace folder is the shared global folder.
pub fn is_global_folder(name: &str) -> bool {
    name.eq_ignore_ascii_case(GLOBAL_FOLDER_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_names_ignore_case() {
        assert!(is_data_folder("Data"));
        assert!(is_data_folder("DATA"));
        assert!(is_data_folder("data"));
        assert!(!is_data_folder("Data Sheets"));
        assert!(is_global_folder("global"));
        assert!(!is_global_folder("Globalization"));
    }
}
