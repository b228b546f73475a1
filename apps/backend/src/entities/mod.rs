pub mod games;
pub mod players;

pub use games::Entity as Games;
pub use players::Entity as Players;
