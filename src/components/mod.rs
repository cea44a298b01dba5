pub mod feedback;
pub mod icons;
pub mod layout;
pub mod modal;
pub mod stat_card;
