use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;

use crate::entities::food_forecast::{
    ActiveModel as FoodForecastActiveModel, Column, Entity as FoodForecast,
    Model as FoodForecastModel,
};
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::BaseRepository;

/// Fields of a forecast about to be stored
#[derive(Debug, Clone)]
pub struct NewFoodForecast {
    pub item_name: String,
    pub expected_footfall: i32,
    pub quantity_recommended: i32,
    pub date: NaiveDate,
}

/// Repository for stored food forecasts
#[derive(Debug, Clone)]
pub struct FoodForecastRepository {
    base: BaseRepository,
}

impl FoodForecastRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<FoodForecastModel>, ServiceError> {
        FoodForecast::find_by_id(id)
            .one(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    /// Forecasts stored for `item_name` on exactly `date`, oldest first
    pub async fn find_by_item_name_and_date(
        &self,
        item_name: &str,
        date: NaiveDate,
    ) -> Result<Vec<FoodForecastModel>, ServiceError> {
        FoodForecast::find()
            .filter(Column::ItemName.eq(item_name))
            .filter(Column::Date.eq(date))
            .order_by_asc(Column::Id)
            .all(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }

    pub async fn create(&self, forecast: NewFoodForecast) -> Result<FoodForecastModel, ServiceError> {
        let active = FoodForecastActiveModel {
            item_name: Set(forecast.item_name),
            expected_footfall: Set(forecast.expected_footfall),
            quantity_recommended: Set(forecast.quantity_recommended),
            date: Set(forecast.date),
            ..Default::default()
        };

        active
            .insert(self.base.get_db())
            .await
            .map_err(ServiceError::DatabaseError)
    }
}
