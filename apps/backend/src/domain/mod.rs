//! Domain layer: tarot deck types, language rules and the shuffle/draw engine.

pub mod cards;
pub mod dealing;
pub mod interpretation;
pub mod lang;
pub mod reading;

#[cfg(test)]
pub(crate) mod test_gens;
#[cfg(test)]
mod tests_props_dealing;

pub use cards::{Card, DECK_SIZE};
pub use dealing::{GroupLabel, GroupOrder, DRAW_COUNT};
pub use interpretation::{Interpretation, Section};
pub use lang::{detect_lang, Lang, RequestedLang};
pub use reading::{DrawnCard, NewReading, Reading};
