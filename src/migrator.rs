use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_food_forecasts_table::Migration)]
    }
}

mod m20240101_000001_create_food_forecasts_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_food_forecasts_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Aligned with entities::food_forecast Model
            manager
                .create_table(
                    Table::create()
                        .table(FoodForecasts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(FoodForecasts::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(FoodForecasts::ItemName).string().not_null())
                        .col(
                            ColumnDef::new(FoodForecasts::ExpectedFootfall)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FoodForecasts::QuantityRecommended)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(FoodForecasts::Date).date().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_food_forecasts_item_name_date")
                        .table(FoodForecasts::Table)
                        .col(FoodForecasts::ItemName)
                        .col(FoodForecasts::Date)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(FoodForecasts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum FoodForecasts {
        Table,
        Id,
        ItemName,
        ExpectedFootfall,
        QuantityRecommended,
        Date,
    }
}
