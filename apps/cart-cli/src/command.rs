//! # Commands
//!
//! Argument parsing and dispatch onto [`CartStore`].
//!
//! ```text
//! cart show                  print the cart
//! cart add <id>              add one unit of a product
//! cart remove <id>           remove a product's line
//! cart set <id> <amount>     set a product's quantity
//! cart totals                print item count, quantity and total
//! ```

use serde::Serialize;
use tracing::debug;

use cart_store::{Cart, CartItem, CartStore, CartTotals, Notice, ProductId, UpdateProductAmount};

use crate::error::CliError;

pub const USAGE: &str = "\
Usage: cart <COMMAND>

Commands:
  show                  Print the cart
  add <id>              Add one unit of a product
  remove <id>           Remove a product from the cart
  set <id> <amount>     Set how many units of a product the cart holds
  totals                Print the cart totals
  help                  Show this help message

Environment:
  CART_API_URL          Catalog API root (default: http://localhost:3333)
  CART_DB_PATH          SQLite file holding the cart
  CART_STORAGE_KEY      Key the cart is stored under
  RUST_LOG              Log filter (default: info,cart=debug,sqlx=warn)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Show,
    Add(ProductId),
    Remove(ProductId),
    Set(UpdateProductAmount),
    Totals,
    Help,
}

impl Command {
    /// Parses the arguments after the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

        match args.as_slice() {
            [] | ["show"] => Ok(Command::Show),
            ["add", id] => Ok(Command::Add(parse_id(id)?)),
            ["remove", id] => Ok(Command::Remove(parse_id(id)?)),
            ["set", id, amount] => Ok(Command::Set(UpdateProductAmount {
                product_id: parse_id(id)?,
                amount: Some(parse_amount(amount)?),
            })),
            ["totals"] => Ok(Command::Totals),
            ["help"] | ["-h"] | ["--help"] => Ok(Command::Help),
            [cmd @ ("add" | "remove" | "set"), ..] => Err(CliError::Usage(format!(
                "Wrong number of arguments for '{}'",
                cmd
            ))),
            [other, ..] => Err(CliError::Usage(format!("Unknown command '{}'", other))),
        }
    }
}

fn parse_id(raw: &str) -> Result<ProductId, CliError> {
    raw.parse()
        .map_err(|_| CliError::Usage(format!("Invalid product id '{}'", raw)))
}

fn parse_amount(raw: &str) -> Result<u32, CliError> {
    raw.parse()
        .map_err(|_| CliError::Usage(format!("Invalid amount '{}'", raw)))
}

/// What a command prints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<CartItem>>,
    pub totals: CartTotals,
    pub notices: Vec<NoticeView>,
}

/// A notice with its shopper-facing message.
#[derive(Debug, Clone, Serialize)]
pub struct NoticeView {
    pub code: Notice,
    pub message: &'static str,
}

impl From<Notice> for NoticeView {
    fn from(notice: Notice) -> Self {
        NoticeView {
            code: notice,
            message: notice.message(),
        }
    }
}

impl Output {
    fn new(cart: &Cart, with_items: bool, notices: Vec<Notice>) -> Self {
        Output {
            items: with_items.then(|| cart.items().to_vec()),
            totals: CartTotals::from(cart),
            notices: notices.into_iter().map(NoticeView::from).collect(),
        }
    }
}

/// Runs `command` against `store`. `drain` returns the notices raised
/// while it ran.
pub async fn execute<F>(store: &CartStore, command: Command, drain: F) -> Output
where
    F: FnOnce() -> Vec<Notice>,
{
    debug!(?command, "Executing command");

    match command {
        Command::Add(id) => store.add_product(id).await,
        Command::Remove(id) => store.remove_product(id).await,
        Command::Set(update) => store.update_product_amount(update).await,
        Command::Show | Command::Totals | Command::Help => {}
    }

    let with_items = !matches!(command, Command::Totals);
    Output::new(&store.cart(), with_items, drain())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use async_trait::async_trait;
    use cart_store::{
        BufferedNotifier, Catalog, CatalogError, MemoryBlobStore, Product, Stock,
        CART_STORAGE_KEY,
    };
    use rust_decimal::Decimal;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(Vec::<String>::new()).unwrap(), Command::Show);
        assert_eq!(Command::parse(["show"]).unwrap(), Command::Show);
        assert_eq!(Command::parse(["add", "3"]).unwrap(), Command::Add(3));
        assert_eq!(Command::parse(["remove", "3"]).unwrap(), Command::Remove(3));
        assert_eq!(
            Command::parse(["set", "3", "0"]).unwrap(),
            Command::Set(UpdateProductAmount {
                product_id: 3,
                amount: Some(0)
            })
        );
        assert_eq!(Command::parse(["totals"]).unwrap(), Command::Totals);
        assert_eq!(Command::parse(["--help"]).unwrap(), Command::Help);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for args in [
            vec!["add"],
            vec!["add", "x"],
            vec!["set", "3"],
            vec!["set", "3", "-1"],
            vec!["remove", "1", "2"],
            vec!["checkout"],
        ] {
            let err = Command::parse(&args).unwrap_err();
            assert!(matches!(err, CliError::Usage(_)), "{:?}", args);
        }
    }

    struct OneProduct;

    #[async_trait]
    impl Catalog for OneProduct {
        async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
            Ok(Product {
                id,
                title: "Tênis VR Caminhada Confortável".to_string(),
                price: Decimal::new(13990, 2),
                image: "https://cdn.example.com/sneaker.jpg".to_string(),
                extra: Default::default(),
            })
        }

        async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
            Ok(Stock { id, amount: 1 })
        }
    }

    #[tokio::test]
    async fn test_execute_reports_notices() {
        let notices = BufferedNotifier::new();
        let store = CartStore::load(
            Arc::new(OneProduct),
            Arc::new(MemoryBlobStore::new()),
            Arc::new(notices.clone()),
            CART_STORAGE_KEY,
        )
        .await;

        let output = execute(&store, Command::Add(7), || notices.drain()).await;
        assert_eq!(output.items.as_ref().map(Vec::len), Some(1));
        assert!(output.notices.is_empty());

        let output = execute(&store, Command::Add(7), || notices.drain()).await;
        assert_eq!(output.notices.len(), 1);
        assert_eq!(output.notices[0].message, "Requested quantity is out of stock");

        let output = execute(&store, Command::Totals, || notices.drain()).await;
        assert!(output.items.is_none());
        assert_eq!(output.totals.total, Decimal::new(13990, 2));

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["totals"]["itemCount"], 1);
        assert!(json.get("items").is_none());
    }
}
