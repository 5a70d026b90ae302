//! Catalogue of the forms the dispatcher knows how to bind.

/// Drop zone element identifier.
pub const DRAG_DROP_ZONE: &str = "dragDropZone";
/// Marker class applied to the drop zone while a drag hovers over it.
pub const DRAG_OVER_CLASS: &str = "drag-over";

/// How a form's fields travel to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormShape {
    /// Multipart body; the JSON reply is rendered into a result container.
    Raw {
        container_id: &'static str,
        container_class: &'static str,
        error_message: &'static str,
    },
    /// Flattened JSON object; the outcome is reported as a notice.
    FieldMap {
        success_message: &'static str,
        error_message: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    DocumentUpload,
    AiUpload,
    Appeal,
    Verification,
    AiReview,
}

impl FormKind {
    pub const ALL: [FormKind; 5] = [
        FormKind::DocumentUpload,
        FormKind::AiUpload,
        FormKind::Appeal,
        FormKind::Verification,
        FormKind::AiReview,
    ];

    /// Element identifier of the form on the page.
    pub fn element_id(self) -> &'static str {
        match self {
            FormKind::DocumentUpload => "uploadForm",
            FormKind::AiUpload => "aiUploadForm",
            FormKind::Appeal => "appealForm",
            FormKind::Verification => "verificationForm",
            FormKind::AiReview => "aiReviewForm",
        }
    }

    /// Backend endpoint the form posts to.
    pub fn endpoint(self) -> &'static str {
        match self {
            FormKind::DocumentUpload => "/upload",
            FormKind::AiUpload => "/ai-process",
            FormKind::Appeal => "/appeals",
            FormKind::Verification => "/verify",
            FormKind::AiReview => "/ai-review",
        }
    }

    pub fn shape(self) -> FormShape {
        match self {
            FormKind::DocumentUpload => FormShape::Raw {
                container_id: "ai-feedback",
                container_class: "feedback-result",
                error_message: "Upload Error",
            },
            FormKind::AiUpload => FormShape::Raw {
                container_id: "processing-results",
                container_class: "processing-results",
                error_message: "AI Processing Error",
            },
            FormKind::Appeal => FormShape::FieldMap {
                success_message: "Appeal submitted successfully!",
                error_message: "Error submitting appeal",
            },
            FormKind::Verification => FormShape::FieldMap {
                success_message: "Verification saved successfully!",
                error_message: "Error saving verification",
            },
            FormKind::AiReview => FormShape::FieldMap {
                success_message: "AI Review submitted successfully!",
                error_message: "Error submitting AI review",
            },
        }
    }

    /// Short name used on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            FormKind::DocumentUpload => "upload",
            FormKind::AiUpload => "ai-upload",
            FormKind::Appeal => "appeal",
            FormKind::Verification => "verification",
            FormKind::AiReview => "ai-review",
        }
    }

    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.element_id() == id)
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }
}
