//! Ball-entity selection over an unlabelled entity set.
//!
//! Naming schemes come from the simulation and are not known up front, so
//! selection is a heuristic: prefer whatever was tracked before, otherwise
//! look for "ball" in the id or display name and fall back to the first
//! entity when nothing matches.

use crate::constants::BALL_NAME_HINT;
use crate::frames::FrameEntity;

/// Picks the entity to track in the current frame.
///
/// A previously tracked id that is still present wins outright, keeping the
/// trace attached to one entity rather than re-picking every tick. Without
/// continuity, entities whose id or name contains `ball`
/// (case-insensitively) outrank the rest; ties keep encounter order, so an
/// entity set with no match yields its first member. An empty set yields
/// `None`.
#[must_use]
pub fn select_entity<'a, 'f>(
    tracked: Option<&str>,
    entities: &'a [FrameEntity<'f>],
) -> Option<&'a FrameEntity<'f>> {
    if let Some(id) = tracked {
        if let Some(found) = entities.iter().find(|ent| ent.id == id) {
            return Some(found);
        }
    }
    // The score is binary, so the first hinted entity is the stable winner;
    // with no hint anywhere the first entity stands in.
    entities
        .iter()
        .find(|ent| looks_like_ball(ent))
        .or_else(|| entities.first())
}

/// Whether the entity's id or name contains the ball hint.
fn looks_like_ball(entity: &FrameEntity<'_>) -> bool {
    entity.id.to_lowercase().contains(BALL_NAME_HINT)
        || entity.name.to_lowercase().contains(BALL_NAME_HINT)
}
