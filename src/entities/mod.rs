pub mod company;

pub use company::Entity as Companies;
