use crate::config::EditorConfig;
use crate::filter::FilterCatalog;

use super::{EditState, ZOOM_MAX, ZOOM_MIN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTool {
    #[default]
    None,
    Text,
    Emoji,
    Filter,
    Transform,
}

impl ActiveTool {
    /// Toolbar order; `None` has no button.
    pub const TOOLBAR: [ActiveTool; 4] = [Self::Filter, Self::Transform, Self::Emoji, Self::Text];

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Text => "Text",
            Self::Emoji => "Sticker",
            Self::Filter => "Filter",
            Self::Transform => "Edit",
        }
    }

    pub const fn opens_panel(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Tool that becomes active when `requested` is pressed while `self` is active.
    pub fn toggled(self, requested: ActiveTool) -> ActiveTool {
        if self == requested {
            Self::None
        } else {
            requested
        }
    }

    pub fn panel(
        self,
        state: &EditState,
        catalog: &FilterCatalog,
        config: &EditorConfig,
    ) -> ToolPanel {
        match self {
            Self::None => ToolPanel::Hidden,
            Self::Filter => ToolPanel::Filters {
                names: catalog.names(),
                selected: state.filter_name().to_string(),
            },
            Self::Transform => ToolPanel::Transform {
                flip_vertical: config.flip_vertical,
                zoom: state.zoom(),
                zoom_range: (ZOOM_MIN, ZOOM_MAX),
            },
            Self::Emoji => ToolPanel::Stickers {
                palette: config.palette(),
                remaining: config.sticker_cap.saturating_sub(state.stickers().len()),
            },
            Self::Text => ToolPanel::CaptionHint {
                counter: state.caption_counter(),
            },
        }
    }
}

/// Content of the option panel for the active tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolPanel {
    Hidden,
    Filters {
        names: Vec<&'static str>,
        selected: String,
    },
    /// Rotate left/right and flip horizontal are always offered.
    Transform {
        flip_vertical: bool,
        zoom: f32,
        zoom_range: (f32, f32),
    },
    Stickers {
        palette: Vec<String>,
        remaining: usize,
    },
    CaptionHint {
        counter: String,
    },
}

impl ToolPanel {
    pub const CAPTION_HINT: &'static str = "Tap on the white border of the photo to type.";
    pub const STICKER_HINT: &'static str = "Drag stickers to move, pinch to resize";

    pub const fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }
}
