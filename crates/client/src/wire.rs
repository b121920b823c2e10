//! JSON shapes exchanged with the backend.
//!
//! Field names follow the backend (`nome`, `preco`, `itens`, ...). Nothing
//! outside this crate sees these types; they convert to and from the domain
//! model at the edge.

use common::{Money, OrderId};
use domain::{Discount, MenuItem, Order, OrderLine, OrderStatus, PaymentMethod};
use serde::{Deserialize, Serialize};

use crate::api::{NewOrder, PaymentReceipt};

/// `GET /menu` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemDto {
    pub id: String,
    pub nome: String,
    pub preco: Money,
}

impl From<MenuItemDto> for MenuItem {
    fn from(dto: MenuItemDto) -> Self {
        MenuItem::new(dto.id, dto.nome, dto.preco)
    }
}

impl From<&MenuItem> for MenuItemDto {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.to_string(),
            nome: item.name.clone(),
            preco: item.price,
        }
    }
}

/// `POST /orders` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub itens: Vec<OrderItemPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desconto: Option<DiscountPayload>,
}

/// One requested line of a new order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemPayload {
    pub pizza_id: String,
    pub quantidade: u32,
}

/// Discount rule, tagged by `tipo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo")]
pub enum DiscountPayload {
    #[serde(rename = "percentual")]
    Percentual { percentual: f64 },

    #[serde(rename = "valor_minimo")]
    ValorMinimo { minimo: Money, desconto_fixo: Money },
}

impl From<&Discount> for DiscountPayload {
    fn from(discount: &Discount) -> Self {
        match *discount {
            Discount::Percentage { fraction } => DiscountPayload::Percentual {
                percentual: fraction,
            },
            Discount::MinimumThreshold {
                minimum,
                fixed_discount,
            } => DiscountPayload::ValorMinimo {
                minimo: minimum,
                desconto_fixo: fixed_discount,
            },
        }
    }
}

impl From<&NewOrder> for CreateOrderRequest {
    fn from(order: &NewOrder) -> Self {
        Self {
            itens: order
                .items
                .iter()
                .map(|item| OrderItemPayload {
                    pizza_id: item.pizza_id.to_string(),
                    quantidade: item.quantity,
                })
                .collect(),
            desconto: order.discount.as_ref().map(DiscountPayload::from),
        }
    }
}

/// Order as serialized by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDto {
    pub id: i64,
    pub status: String,
    pub itens: Vec<OrderLineDto>,
    pub subtotal: Money,
    pub desconto: Money,
    pub total_final: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineDto {
    pub pizza: PizzaDto,
    pub quantidade: u32,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PizzaDto {
    pub nome: String,
    pub preco: Money,
}

impl From<OrderDto> for Order {
    fn from(dto: OrderDto) -> Self {
        Order {
            id: OrderId::new(dto.id),
            status: OrderStatus::from_code(&dto.status),
            lines: dto
                .itens
                .into_iter()
                .map(|line| OrderLine {
                    name: line.pizza.nome,
                    unit_price: line.pizza.preco,
                    quantity: line.quantidade,
                    line_total: line.total,
                })
                .collect(),
            subtotal: dto.subtotal,
            discount: dto.desconto,
            total: dto.total_final,
        }
    }
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.as_i64(),
            status: order.status.code().to_string(),
            itens: order
                .lines
                .iter()
                .map(|line| OrderLineDto {
                    pizza: PizzaDto {
                        nome: line.name.clone(),
                        preco: line.unit_price,
                    },
                    quantidade: line.quantity,
                    total: line.line_total,
                })
                .collect(),
            subtotal: order.subtotal,
            desconto: order.discount,
            total_final: order.total,
        }
    }
}

/// `PATCH /orders/{id}/status` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// `POST /orders/{id}/pay` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayRequest {
    pub metodo: String,
}

impl From<PaymentMethod> for PayRequest {
    fn from(method: PaymentMethod) -> Self {
        Self {
            metodo: method.code().to_string(),
        }
    }
}

/// `POST /orders/{id}/pay` response. Both fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub order: Option<OrderDto>,
}

impl From<PayResponse> for PaymentReceipt {
    fn from(response: PayResponse) -> Self {
        PaymentReceipt {
            message: response.message,
            order: response.order.map(Order::from),
        }
    }
}

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
