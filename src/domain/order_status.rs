use serde::{Deserialize, Serialize};

// Order lifecycle; mock checkout settles an order immediately, the hosted
// path leaves it pending until the provider confirms
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Paid,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
        }
    }

    pub fn parse(value: &str) -> Result<OrderStatus, String> {
        match value {
            "PENDING" => Ok(OrderStatus::Pending),
            "PAID" => Ok(OrderStatus::Paid),
            other => Err(format!("{} is not a known order status", other)),
        }
    }
}
