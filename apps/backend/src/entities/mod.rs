pub mod interpretation_details;
pub mod interpretations;
pub mod reading_cards;
pub mod readings;
pub mod share_links;

pub use interpretation_details::Entity as InterpretationDetails;
pub use interpretations::Entity as Interpretations;
pub use reading_cards::Entity as ReadingCards;
pub use readings::Entity as Readings;
pub use share_links::Entity as ShareLinks;
