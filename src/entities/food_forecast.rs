use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stored recommendation for one item on one date.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "food_forecasts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[validate(length(min = 1, max = 255))]
    pub item_name: String,
    pub expected_footfall: i32,
    pub quantity_recommended: i32,
    pub date: NaiveDate,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
