mod card;
mod field;
mod helpers;

pub use card::CardGpu;
pub use field::FieldGpu;
