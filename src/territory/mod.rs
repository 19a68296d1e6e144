mod builtin;
mod model;
mod source;

pub use builtin::builtin_territories;
pub use model::{Territory, TerritoryLabel, TerritoryRecord};
pub use source::{format_territory_name, load_territories, parse_territories_json};
