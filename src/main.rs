//! `SmartSupply` storefront CLI

use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand};
use jiff::civil::Date;
use smartsupply::{
    cart::{BulkOrderDraft, BulkOrderError, CartError, CartService, DeliveryFrequency, bulk_product},
    catalog::{Catalog, FarmerId, ItemId},
    checkout::{CheckoutError, CheckoutForm, checkout},
    clock::{Clock, SystemClock},
    config::{ConfigError, StorefrontConfig},
    delivery::DeliveryDetails,
    logging::{self, LoggingError},
    orders::{OrderError, OrderId, OrderService, PaymentMethod},
    pricing::{CouponError, ShippingOption},
    storage::FileStore,
    tables::{self, TableError},
};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Parser)]
#[command(name = "smartsupply", about = "SmartSupply storefront", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: StorefrontConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List catalog products
    Products,

    /// List farmers and their bulk products
    Farmers,

    /// Inspect or change the cart
    Cart(CartCommand),

    /// Place an order for everything in the cart
    Checkout(CheckoutArgs),

    /// Inspect or update the order history
    Orders(OrdersCommand),
}

#[derive(Debug, Args)]
struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart and its price summary
    Show(PricingArgs),

    /// Add one unit of a catalog product
    Add {
        /// Product id
        id: u64,
    },

    /// Add a catalog product in bulk as its own line
    Bulk {
        /// Product id
        id: u64,

        /// Units to order
        quantity: u32,
    },

    /// Add a bulk order placed with a farmer
    FarmerBulk(FarmerBulkArgs),

    /// Remove every line with an id
    Remove {
        /// Line id
        id: u64,
    },

    /// Change a line's quantity by a signed amount
    Update {
        /// Line id
        id: u64,

        /// Amount to add; negative to reduce
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },

    /// Remove every line
    Clear,
}

#[derive(Debug, Args)]
struct PricingArgs {
    /// Delivery speed
    #[arg(long, value_enum, default_value_t = ShippingOption::Standard)]
    shipping: ShippingOption,

    /// Coupon code to apply
    #[arg(long)]
    coupon: Option<String>,
}

#[derive(Debug, Args)]
struct FarmerBulkArgs {
    /// Farmer id
    #[arg(long)]
    farmer: u32,

    /// Product name as listed by `farmers`
    #[arg(long)]
    product: String,

    /// Extra minimum-order steps on top of the minimum
    #[arg(long, default_value_t = 0)]
    steps: u32,

    /// First delivery date (YYYY-MM-DD)
    #[arg(long)]
    delivery_date: Option<Date>,

    /// Repeat schedule
    #[arg(long, value_enum, default_value_t = DeliveryFrequency::OneTime)]
    frequency: DeliveryFrequency,

    /// Instructions for the farmer
    #[arg(long, default_value = "")]
    instructions: String,
}

#[derive(Debug, Args)]
struct CheckoutArgs {
    #[command(flatten)]
    pricing: PricingArgs,

    /// Payment choice
    #[arg(long, value_enum, default_value_t = PaymentMethod::Card)]
    payment: PaymentMethod,

    /// Notes for the order
    #[arg(long, default_value = "")]
    notes: String,
}

#[derive(Debug, Args)]
struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List orders, newest first
    List,

    /// Confirm receipt of a processing order
    Confirm {
        /// Order id, with or without the ORD prefix
        id: OrderId,
    },

    /// Show an order with its courier details
    Delivery {
        /// Order id, with or without the ORD prefix
        id: OrderId,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error(transparent)]
    Output(#[from] TableError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    BulkOrder(#[from] BulkOrderError),

    #[error(transparent)]
    Coupon(#[from] CouponError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("no product with id {0}")]
    UnknownProduct(ItemId),

    #[error("no farmer with id {0}")]
    UnknownFarmer(FarmerId),

    #[error("no line with id {0} in the cart")]
    UnknownLine(ItemId),
}

#[expect(clippy::print_stderr, reason = "CLI error output to user")]
fn main() -> ExitCode {
    StorefrontConfig::load_dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("error: {error}");

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<(), CliError> {
    logging::init_subscriber(&cli.config.logging)?;

    let catalog = cli.config.catalog()?;
    let store = cli.config.store()?;
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Products => tables::write_products(&mut out, catalog.products())?,
        Commands::Farmers => tables::write_farmers(&mut out, catalog.farmers())?,
        Commands::Cart(CartCommand { command }) => {
            let mut cart = CartService::load(store);

            run_cart(&mut out, &catalog, &mut cart, command)?;
        }
        Commands::Checkout(args) => {
            let mut cart = CartService::load(store.clone());
            let mut orders = OrderService::load(store);
            let mut form = pricing_form(&args.pricing)?;

            form.payment_method = args.payment;
            form.notes = args.notes;

            let receipt = checkout(&mut cart, &mut orders, &mut form)?;

            writeln!(
                out,
                "Order {} placed. Total {}",
                receipt.order_id,
                receipt.breakdown.total()
            )?;
        }
        Commands::Orders(OrdersCommand { command }) => {
            let mut orders = OrderService::load(store);

            match command {
                OrdersSubcommand::List => tables::write_orders(&mut out, orders.orders())?,
                OrdersSubcommand::Confirm { id } => {
                    let order = orders.confirm_receipt(id)?;

                    writeln!(out, "Order {} confirmed as received!", order.id)?;
                }
                OrdersSubcommand::Delivery { id } => {
                    let order = orders.get(id).ok_or(OrderError::NotFound(id))?;

                    tables::write_order(&mut out, order, &DeliveryDetails::for_order(order.id))?;
                }
            }
        }
    }

    Ok(())
}

fn run_cart(
    out: &mut impl Write,
    catalog: &Catalog,
    cart: &mut CartService<FileStore>,
    command: CartSubcommand,
) -> Result<(), CliError> {
    let notice = match command {
        CartSubcommand::Show(args) => {
            let mut form = CheckoutForm::new();

            form.shipping = args.shipping;

            // An unknown code is reported as coupon feedback under the table
            if let Some(code) = &args.coupon {
                if let Err(error) = form.coupon.apply(code) {
                    warn!(%error, "coupon not applied");
                }
            }

            let breakdown = form.summary(cart)?;

            tables::write_cart(&mut *out, cart.lines(), &breakdown, form.coupon.status())?;

            return Ok(());
        }
        CartSubcommand::Add { id } => {
            let product = find_product(catalog, id)?;

            cart.add_to_cart(product)?
        }
        CartSubcommand::Bulk { id, quantity } => {
            let product = find_product(catalog, id)?;

            cart.add_to_cart(bulk_product(product, quantity)?)?
        }
        CartSubcommand::FarmerBulk(args) => {
            let farmer_id = FarmerId(args.farmer);
            let farmer = catalog
                .farmer(farmer_id)
                .ok_or(CliError::UnknownFarmer(farmer_id))?;
            let mut draft = BulkOrderDraft::new(farmer);

            draft.select_product(&args.product)?;

            for _ in 0..args.steps {
                draft.increase();
            }

            if let Some(date) = args.delivery_date {
                draft.set_delivery_date(date);
            }

            draft.set_frequency(args.frequency);
            draft.set_special_instructions(args.instructions);

            let request = draft.build(SystemClock.today())?;

            cart.add_to_cart(request)?
        }
        CartSubcommand::Remove { id } => cart
            .remove_from_cart(ItemId(id))
            .ok_or(CliError::UnknownLine(ItemId(id)))?,
        CartSubcommand::Update { id, delta } => {
            let id = ItemId(id);

            if !cart.lines().iter().any(|line| line.id() == id) {
                return Err(CliError::UnknownLine(id));
            }

            cart.update_quantity(id, delta)?;

            writeln!(out, "Cart now holds {} items", cart.total_items())?;

            return Ok(());
        }
        CartSubcommand::Clear => cart.clear_cart(),
    };

    writeln!(out, "{notice}")?;

    Ok(())
}

fn pricing_form(args: &PricingArgs) -> Result<CheckoutForm, CliError> {
    let mut form = CheckoutForm::new();

    form.shipping = args.shipping;

    if let Some(code) = &args.coupon {
        form.coupon.apply(code)?;
    }

    Ok(form)
}

fn find_product(catalog: &Catalog, id: u64) -> Result<smartsupply::catalog::Product, CliError> {
    catalog
        .product(ItemId(id))
        .cloned()
        .ok_or(CliError::UnknownProduct(ItemId(id)))
}
