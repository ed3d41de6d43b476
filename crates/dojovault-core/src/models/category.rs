//! Document categories and their acceptance rules.

use serde::{Deserialize, Serialize};

/// Category of a document attached to a membership record.
///
/// The category determines which MIME types a selected file may have and how
/// the widget labels itself. Wire names match the storage API's
/// `document_type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentCategory {
    /// Member photo attached to a member-status record. Images only.
    #[serde(rename = "member_photo")]
    MemberPhoto,
    /// Graduation certificate. Images or PDF.
    #[serde(rename = "graduation")]
    GraduationCertificate,
    /// Qualification certificate. Images or PDF.
    #[serde(rename = "qualification")]
    QualificationCertificate,
}

const PHOTO_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];
const CERTIFICATE_CONTENT_TYPES: &[&str] =
    &["application/pdf", "image/jpeg", "image/jpg", "image/png"];

impl DocumentCategory {
    /// Value sent in the multipart `document_type` field.
    pub fn wire_name(&self) -> &'static str {
        match self {
            DocumentCategory::MemberPhoto => "member_photo",
            DocumentCategory::GraduationCertificate => "graduation",
            DocumentCategory::QualificationCertificate => "qualification",
        }
    }

    /// MIME types a file may have to be accepted for this category.
    pub fn allowed_content_types(&self) -> &'static [&'static str] {
        match self {
            DocumentCategory::MemberPhoto => PHOTO_CONTENT_TYPES,
            _ => CERTIFICATE_CONTENT_TYPES,
        }
    }

    /// Accepted extensions, for display in the upload prompt.
    pub fn accepted_extensions_label(&self) -> &'static str {
        match self {
            DocumentCategory::MemberPhoto => ".jpg, .jpeg, .png",
            _ => ".pdf, .jpg, .jpeg, .png",
        }
    }

    /// Human-readable label for the widget header.
    pub fn display_label(&self) -> &'static str {
        match self {
            DocumentCategory::MemberPhoto => "Member photo",
            DocumentCategory::GraduationCertificate => "Graduation certificate",
            DocumentCategory::QualificationCertificate => "Qualification certificate",
        }
    }

    /// Message shown when a file's MIME type is outside the accepted set.
    pub fn unsupported_type_message(&self) -> &'static str {
        match self {
            DocumentCategory::MemberPhoto => "Photos must be JPG or PNG",
            _ => "Certificates must be PDF, JPG or PNG",
        }
    }

    pub fn is_photo(&self) -> bool {
        matches!(self, DocumentCategory::MemberPhoto)
    }
}

/// Thumbnail variants the storage API can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailSize {
    Small,
    Medium,
    Large,
}

impl ThumbnailSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThumbnailSize::Small => "small",
            ThumbnailSize::Medium => "medium",
            ThumbnailSize::Large => "large",
        }
    }
}
