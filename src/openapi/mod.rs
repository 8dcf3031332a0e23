use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SmartServe API",
        version = "0.1.0",
        description = r#"
# SmartServe Food Forecasting API

Recommends how many food units to prepare for an event and how many units
that saves compared with a flat two units per attendee.

## Forecasting

The recommendation starts at 1.2 units per expected attendee, is scaled by the
event type and audience profile multipliers, and is finally corrected by the
mean consumption ratio of past events supplied with the request.

## Error Handling

Errors share one JSON shape:

```json
{
  "error": "Bad Request",
  "message": "Validation failed: footfall: footfall must not be negative",
  "timestamp": "2024-01-01T00:00:00Z"
}
```
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "forecast", description = "Food quantity forecasting endpoints"),
    ),
    paths(
        crate::handlers::forecast::create_forecast,
        crate::handlers::forecast::explain_forecast,
        crate::handlers::forecast::list_categories,
        crate::handlers::forecast::create_record,
        crate::handlers::forecast::list_records,
    ),
    components(
        schemas(
            crate::dto::forecast::EventDetails,
            crate::dto::forecast::HistoricalDataItem,
            crate::dto::forecast::ForecastRequest,
            crate::dto::forecast::ForecastResponse,
            crate::dto::forecast::ForecastExplanation,
            crate::dto::forecast::CategoryFactor,
            crate::dto::forecast::CategoriesResponse,
            crate::dto::forecast::CreateStoredForecastRequest,
            crate::dto::forecast::StoredForecastResponse,

            // Error types
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
