//! Data access: one repository per table. Every call takes the connection (or open
//! transaction) it runs on, so the caller decides the unit of work.

mod baked_goods;
mod bakeries;

pub use baked_goods::BakedGoodRepo;
pub use bakeries::BakeryRepo;

const BAKERY_COLUMNS: &str = "id, name, created_at, updated_at";
const BAKED_GOOD_COLUMNS: &str = "id, name, price, bakery_id, created_at, updated_at";
