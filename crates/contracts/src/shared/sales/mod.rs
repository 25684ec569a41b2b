use serde::{Deserialize, Serialize};

use crate::shared::lenient;

/// Sales of one model produced by a sales channel (direct sales or
/// reservations). Both channels use the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    #[serde(deserialize_with = "lenient::identifier")]
    pub model_id: String,
    #[serde(default)]
    pub model_name: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient::float")]
    pub revenue: f64,
}

impl SaleRecord {
    pub fn new(
        model_id: impl Into<String>,
        model_name: impl Into<String>,
        quantity: i64,
        revenue: f64,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            model_name: model_name.into(),
            quantity,
            revenue,
        }
    }
}

/// Totals of one model across all channels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedSale {
    pub model_id: String,
    pub model_name: String,
    pub total_quantity: i64,
    pub total_revenue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_record_coerces_dirty_numbers() {
        let r: SaleRecord = serde_json::from_str(
            r#"{"modelId": 42, "modelName": "A", "quantity": "oops", "revenue": null}"#,
        )
        .unwrap();
        assert_eq!(r.model_id, "42");
        assert_eq!(r.quantity, 0);
        assert_eq!(r.revenue, 0.0);
    }

    #[test]
    fn test_sale_record_missing_numbers_default_to_zero() {
        let r: SaleRecord = serde_json::from_str(r#"{"modelId": "m1"}"#).unwrap();
        assert_eq!(r, SaleRecord::new("m1", "", 0, 0.0));
    }

    #[test]
    fn test_aggregated_sale_serializes_camel_case() {
        let s = AggregatedSale {
            model_id: "2".into(),
            model_name: "B".into(),
            total_quantity: 10,
            total_revenue: 20.0,
        };
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["totalQuantity"], 10);
        assert_eq!(v["totalRevenue"], 20.0);
        assert_eq!(v["modelName"], "B");
    }
}
