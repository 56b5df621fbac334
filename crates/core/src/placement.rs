//! Panel placement: which side of the anchor the suggestion panel opens on.
//!
//! Pure geometry; the embedder calls [`decide`] on every anchor or viewport
//! geometry change and positions its overlay from the result. Nothing here
//! is cached.

use chipline_types::{PanelDirection, PlacementDecision, RegionGeometry};

/// Gap kept between the panel edge and the viewport edge, in layout units.
pub const PANEL_EDGE_MARGIN: f32 = 5.0;

/// Decide panel side, max height, and offset for the given anchor geometry.
///
/// Absent a forced direction the panel goes below when the space below
/// either clears `min_panel_height` or beats the space above; otherwise it
/// goes above. `max_height` is the chosen side's space minus
/// [`PANEL_EDGE_MARGIN`], floored at zero. `offset` is a vertical translation
/// from the anchor's top edge, positive downward: the panel's near edge sits
/// flush with the anchor's far edge on either side.
pub fn decide(
    anchor: RegionGeometry,
    min_panel_height: f32,
    forced: Option<PanelDirection>,
) -> PlacementDecision {
    let direction = forced.unwrap_or({
        if anchor.space_below > min_panel_height || anchor.space_below > anchor.space_above {
            PanelDirection::Below
        } else {
            PanelDirection::Above
        }
    });
    let side_space = match direction {
        PanelDirection::Below => anchor.space_below,
        PanelDirection::Above => anchor.space_above,
    };
    let max_height = (side_space - PANEL_EDGE_MARGIN).max(0.0);
    let offset = match direction {
        PanelDirection::Below => anchor.size.height,
        PanelDirection::Above => -max_height,
    };
    PlacementDecision {
        direction,
        max_height,
        offset,
    }
}
