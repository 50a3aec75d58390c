//! Sales.

use async_graphql::{Context, ID, InputObject, Object};
use chrono::{DateTime, Utc};

use flow_core::auth::Operation;
use flow_core::orders::{LineItemInput, PaymentMode};
use flow_db::entities::{sale_items, sales};
use flow_db::repositories::{CreateSaleInput as NewSale, DateRange};
use flow_db::{CustomerRepository, ProductRepository, SaleRepository, UserRepository};

use super::customer::Customer;
use super::error::GraphqlResultExt;
use super::product::Product;
use super::scalars::{
    PaymentModeValue, money, parse_id, parse_money, parse_money_or_zero, parse_opt_id, timestamp,
    to_id,
};
use super::user::User;
use super::{db, found, guard, guard_identity};

/// A recorded sale with its invoice number.
pub struct Sale(pub sales::Model);

#[Object]
impl Sale {
    async fn id(&self) -> ID {
        to_id(self.0.id)
    }

    async fn invoice_number(&self) -> &str {
        &self.0.invoice_number
    }

    /// Null for walk-in sales.
    async fn customer(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Customer>> {
        let Some(customer_id) = self.0.customer_id else {
            return Ok(None);
        };
        let customer = CustomerRepository::new(db(ctx)?)
            .find_by_id(customer_id)
            .await
            .gql()?;
        Ok(customer.map(Customer))
    }

    async fn items(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<SaleItem>> {
        let items = SaleRepository::new(db(ctx)?).items(self.0.id).await.gql()?;
        Ok(items.into_iter().map(SaleItem).collect())
    }

    async fn subtotal(&self) -> f64 {
        money(self.0.subtotal)
    }

    async fn discount(&self) -> f64 {
        money(self.0.discount)
    }

    async fn total(&self) -> f64 {
        money(self.0.total)
    }

    async fn payment_mode(&self) -> PaymentModeValue {
        PaymentMode::from(self.0.payment_mode).into()
    }

    async fn paid_amount(&self) -> f64 {
        money(self.0.paid_amount)
    }

    async fn due_amount(&self) -> f64 {
        money(self.0.due_amount)
    }

    async fn created_at(&self) -> DateTime<Utc> {
        timestamp(self.0.created_at)
    }

    async fn updated_at(&self) -> DateTime<Utc> {
        timestamp(self.0.updated_at)
    }

    async fn created_by(&self, ctx: &Context<'_>) -> async_graphql::Result<User> {
        let user = UserRepository::new(db(ctx)?)
            .find_by_id(self.0.created_by_id)
            .await
            .gql()?;
        found(user, "User").map(User)
    }
}

/// One sold line.
pub struct SaleItem(pub sale_items::Model);

#[Object]
impl SaleItem {
    async fn id(&self) -> ID {
        to_id(self.0.id)
    }

    async fn product(&self, ctx: &Context<'_>) -> async_graphql::Result<Product> {
        let product = ProductRepository::new(db(ctx)?)
            .find_by_id(self.0.product_id)
            .await
            .gql()?;
        found(product, "Product").map(Product)
    }

    async fn quantity(&self) -> i32 {
        self.0.quantity
    }

    async fn unit_price(&self) -> f64 {
        money(self.0.unit_price)
    }

    async fn total(&self) -> f64 {
        money(self.0.total)
    }
}

/// A requested sale line.
#[derive(InputObject)]
pub struct SaleItemInput {
    /// Product sold.
    pub product_id: ID,
    /// Units sold; must be positive.
    pub quantity: i32,
    /// Agreed price per unit.
    pub unit_price: f64,
}

impl SaleItemInput {
    fn to_line(&self) -> async_graphql::Result<LineItemInput> {
        Ok(LineItemInput {
            product_id: parse_id(&self.product_id)?,
            quantity: self.quantity,
            unit_price: parse_money(self.unit_price)?,
        })
    }
}

/// New sale fields.
#[derive(InputObject)]
pub struct CreateSaleInput {
    /// Buying customer; required when money is left owing.
    pub customer_id: Option<ID>,
    /// Lines in display order.
    pub items: Vec<SaleItemInput>,
    /// Discount off the subtotal, 0 when omitted.
    pub discount: Option<f64>,
    /// How the sale is settled.
    pub payment_mode: PaymentModeValue,
    /// Amount paid now.
    pub paid_amount: f64,
}

/// Sale queries.
#[derive(Default)]
pub struct SaleQuery;

#[Object]
impl SaleQuery {
    /// Sales in the inclusive date window, newest first.
    async fn sales(
        &self,
        ctx: &Context<'_>,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> async_graphql::Result<Vec<Sale>> {
        guard(ctx, Operation::Sales)?;
        let range = DateRange {
            start: start_date,
            end: end_date,
        };
        let sales = SaleRepository::new(db(ctx)?).list(range).await.gql()?;
        Ok(sales.into_iter().map(Sale).collect())
    }

    async fn sale(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Option<Sale>> {
        guard(ctx, Operation::Sale)?;
        let sale = SaleRepository::new(db(ctx)?)
            .find_by_id(parse_id(&id)?)
            .await
            .gql()?;
        Ok(sale.map(Sale))
    }
}

/// Sale mutations.
#[derive(Default)]
pub struct SaleMutation;

#[Object]
impl SaleMutation {
    /// Records a sale, draws down stock and charges any unpaid amount to
    /// the customer, all or nothing.
    async fn create_sale(
        &self,
        ctx: &Context<'_>,
        input: CreateSaleInput,
    ) -> async_graphql::Result<Sale> {
        let identity = guard_identity(ctx, Operation::CreateSale)?;

        let items = input
            .items
            .iter()
            .map(SaleItemInput::to_line)
            .collect::<async_graphql::Result<Vec<_>>>()?;

        let sale = SaleRepository::new(db(ctx)?)
            .create(NewSale {
                customer_id: parse_opt_id(input.customer_id.as_ref())?,
                items,
                discount: parse_money_or_zero(input.discount)?,
                payment_mode: input.payment_mode.into(),
                paid_amount: parse_money(input.paid_amount)?,
                created_by: identity.id,
            })
            .await
            .gql()?;

        Ok(Sale(sale))
    }
}
