use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use client_core::views::{MovieListView, OrderDetailsView, OrderListView, ShowtimeEditView};
use client_core::{AdminClient, Session, SessionStore};
use shared::domain::{OrderId, ShowtimeId};
use shared::format::{format_currency, format_date, format_time};
use table_core::SortOrder;
use tracing::debug;
use url::Url;

mod config;

#[derive(Parser, Debug)]
#[command(name = "cineops", version, about = "Admin console for a cinema ticketing backend")]
struct Cli {
    /// Base URL of the admin API, overriding the configured value.
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store a bearer credential for later commands.
    Login {
        #[arg(long)]
        token: String,
    },
    /// Forget the stored credential.
    Logout,
    /// Order management.
    #[command(subcommand)]
    Orders(OrdersCommand),
    /// Movie list with the table controls.
    #[command(subcommand)]
    Movies(MoviesCommand),
    /// Showtime inspection and editing.
    #[command(subcommand)]
    Showtimes(ShowtimesCommand),
    /// Raw film catalogue.
    #[command(subcommand)]
    Films(FilmsCommand),
}

#[derive(Subcommand, Debug)]
enum OrdersCommand {
    /// List orders with filtering, sorting and paging.
    List(ListArgs),
    /// Print one order with its ticket and popcorn lines.
    Show { id: i64 },
    /// Delete orders one at a time, stopping at the first failure.
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}

#[derive(Subcommand, Debug)]
enum MoviesCommand {
    List(ListArgs),
}

#[derive(Subcommand, Debug)]
enum ShowtimesCommand {
    Show { id: i64 },
    Edit(EditShowtimeArgs),
}

#[derive(Subcommand, Debug)]
enum FilmsCommand {
    List,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Filter text matched against the filter attribute.
    #[arg(long, default_value = "")]
    filter: String,
    /// Attribute the filter text is matched against.
    #[arg(long)]
    by: Option<String>,
    /// Column key to sort by.
    #[arg(long)]
    sort: Option<String>,
    /// Sort direction, asc or desc.
    #[arg(long, default_value = "asc")]
    order: String,
    /// Zero-based page index.
    #[arg(long, default_value_t = 0)]
    page: usize,
    /// Rows per page.
    #[arg(long, default_value_t = 10)]
    rows: usize,
}

#[derive(Args, Debug)]
struct EditShowtimeArgs {
    id: i64,
    #[arg(long)]
    film: Option<String>,
    #[arg(long)]
    room: Option<String>,
    #[arg(long)]
    cinema: Option<String>,
    /// New date, YYYY-MM-DD.
    #[arg(long)]
    date: Option<String>,
    /// New start time, HH:MM.
    #[arg(long)]
    time: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let cli = Cli::parse();
    let settings = config::load_settings();
    let store = session_store(&settings)?;
    debug!(path = %store.path().display(), "using credential file");

    match cli.command {
        Command::Login { token } => {
            store.save(&Session::new(token))?;
            println!("credential saved to {}", store.path().display());
            Ok(())
        }
        Command::Logout => {
            store.clear()?;
            println!("credential cleared");
            Ok(())
        }
        Command::Orders(command) => {
            let client = admin_client(cli.api_url.as_deref(), &settings, &store)?;
            match command {
                OrdersCommand::List(args) => orders_list(&client, args).await,
                OrdersCommand::Show { id } => order_show(&client, OrderId(id)).await,
                OrdersCommand::Delete { ids } => orders_delete(&client, ids).await,
            }
        }
        Command::Movies(MoviesCommand::List(args)) => {
            let client = admin_client(cli.api_url.as_deref(), &settings, &store)?;
            movies_list(&client, args).await
        }
        Command::Showtimes(command) => {
            let client = admin_client(cli.api_url.as_deref(), &settings, &store)?;
            match command {
                ShowtimesCommand::Show { id } => showtime_show(&client, ShowtimeId(id)).await,
                ShowtimesCommand::Edit(args) => showtime_edit(&client, args).await,
            }
        }
        Command::Films(FilmsCommand::List) => {
            let client = admin_client(cli.api_url.as_deref(), &settings, &store)?;
            films_list(&client).await
        }
    }
}

fn session_store(settings: &config::Settings) -> Result<SessionStore> {
    let path = match &settings.credentials_path {
        Some(path) => path.clone(),
        None => SessionStore::default_path()
            .context("no platform config directory for the credential file")?,
    };
    Ok(SessionStore::new(path))
}

fn admin_client(
    api_url_flag: Option<&str>,
    settings: &config::Settings,
    store: &SessionStore,
) -> Result<AdminClient> {
    let raw = api_url_flag.unwrap_or(&settings.api_url);
    let base_url = Url::parse(raw).with_context(|| format!("invalid api url '{raw}'"))?;
    let mut client = AdminClient::new(base_url);
    client.set_session(store.load()?);
    Ok(client)
}

fn sort_direction(raw: &str) -> Result<SortOrder> {
    if raw.eq_ignore_ascii_case("asc") {
        Ok(SortOrder::Asc)
    } else if raw.eq_ignore_ascii_case("desc") {
        Ok(SortOrder::Desc)
    } else {
        bail!("sort direction must be asc or desc, got '{raw}'")
    }
}

async fn orders_list(client: &AdminClient, args: ListArgs) -> Result<()> {
    let ListArgs {
        filter,
        by,
        sort,
        order,
        page,
        rows,
    } = args;

    let mut view = OrderListView::new();
    view.refresh(client).await.context("loading orders")?;

    if let Some(by) = &by {
        if !view.set_filter_attribute(by) {
            bail!("unknown filter attribute '{by}'");
        }
    }
    view.set_query(filter);
    if let Some(sort) = &sort {
        if !view.on_sort(sort) {
            bail!("unknown sort column '{sort}'");
        }
    }
    view.table.order = sort_direction(&order)?;
    view.table.on_change_rows_per_page(rows);
    view.table.on_change_page(page);

    println!(
        "{:<8} {:<14} {:<24} {:<20} {:<10} {:<12} {:>14} {:<12}",
        "id", "username", "film", "cinema", "room", "show date", "total", "ordered"
    );
    let visible = view.visible_page();
    for order in &visible {
        println!(
            "{:<8} {:<14} {:<24} {:<20} {:<10} {:<12} {:>14} {:<12}",
            order.order_id.0,
            order.username,
            order.film_name,
            order.cinema_name,
            order.room_name,
            format_date(&order.show_date),
            format_currency(order.total_price),
            format_date(&order.order_date),
        );
    }
    let filtered = view.filtered().len();
    let pages = view.table.pagination.page_count(filtered).max(1);
    println!(
        "page {}/{} ({} of {} orders)",
        view.table.pagination.page + 1,
        pages,
        visible.len(),
        filtered
    );
    Ok(())
}

async fn order_show(client: &AdminClient, id: OrderId) -> Result<()> {
    let mut view = OrderDetailsView::new(id);
    view.refresh(client).await.context("loading order detail")?;

    let Some(header) = view.header() else {
        println!("order {} has no detail rows", id.0);
        return Ok(());
    };
    println!("order {} for {}", header.order_id.0, header.username);
    println!("  film     {}", header.film_name);
    println!("  show     {}", format_date(&header.show_date));
    println!("  ordered  {}", format_date(&header.order_date));
    println!("  total    {}", format_currency(header.total_price));
    if !view.tickets().is_empty() {
        println!("tickets:");
        for ticket in view.tickets() {
            println!(
                "  {} {} seat {}{} {}",
                ticket.cinema_name,
                ticket.room_name,
                ticket.seat_row,
                ticket.seat_number,
                format_currency(ticket.ticket_price),
            );
        }
    }
    if !view.popcorn().is_empty() {
        println!("popcorn:");
        for combo in view.popcorn() {
            println!(
                "  {} x{} {}",
                combo.combo_name,
                combo.combo_quantity,
                format_currency(combo.combo_price),
            );
        }
    }
    Ok(())
}

async fn orders_delete(client: &AdminClient, ids: Vec<i64>) -> Result<()> {
    let mut view = OrderListView::new();
    view.refresh(client).await.context("loading orders")?;
    for id in ids {
        view.toggle(OrderId(id));
    }

    let outcome = view.delete_selected(client).await;
    for id in &outcome.deleted {
        println!("deleted order {}", id.0);
    }
    if let Some((id, err)) = outcome.failed {
        bail!("order {} was not deleted ({err}); later orders were not attempted", id.0);
    }
    Ok(())
}

async fn movies_list(client: &AdminClient, args: ListArgs) -> Result<()> {
    let ListArgs {
        filter,
        by,
        sort,
        order,
        page,
        rows,
    } = args;

    let mut view = MovieListView::new();
    view.refresh(client).await.context("loading films")?;

    if let Some(by) = &by {
        if !view.set_filter_attribute(by) {
            bail!("unknown filter attribute '{by}'");
        }
    }
    view.set_query(filter);
    if let Some(sort) = &sort {
        if !view.on_sort(sort) {
            bail!("unknown sort column '{sort}'");
        }
    }
    view.table.order = sort_direction(&order)?;
    view.table.on_change_rows_per_page(rows);
    view.table.on_change_page(page);

    println!("{:<8} {:<26} {}", "id", "name", "description");
    let visible = view.visible_page();
    for film in &visible {
        println!(
            "{:<8} {:<26} {}",
            film.film_id.0, film.film_name, film.film_describe
        );
    }
    let filtered = view.filtered().len();
    let pages = view.table.pagination.page_count(filtered).max(1);
    println!(
        "page {}/{} ({} of {} films)",
        view.table.pagination.page + 1,
        pages,
        visible.len(),
        filtered
    );
    Ok(())
}

async fn showtime_show(client: &AdminClient, id: ShowtimeId) -> Result<()> {
    let mut view = ShowtimeEditView::new(id);
    view.refresh(client).await.context("loading showtime")?;

    if let Some(form) = view.form() {
        println!("showtime {}", id.0);
        println!("  film    {}", form.film_name);
        println!("  room    {}", form.room_name);
        println!("  cinema  {}", form.cinema_name);
        println!("  date    {}", form.show_date.format("%d/%m/%Y"));
        println!("  time    {}", format_time(&form.show_time));
    }
    Ok(())
}

async fn showtime_edit(client: &AdminClient, args: EditShowtimeArgs) -> Result<()> {
    let id = ShowtimeId(args.id);
    let mut view = ShowtimeEditView::new(id);
    view.refresh(client).await.context("loading showtime")?;

    let date = args.date.as_deref().map(parse_date).transpose()?;
    let time = args.time.as_deref().map(parse_time).transpose()?;

    if let Some(form) = view.form_mut() {
        if let Some(film) = args.film {
            form.film_name = film;
        }
        if let Some(room) = args.room {
            form.room_name = room;
        }
        if let Some(cinema) = args.cinema {
            form.cinema_name = cinema;
        }
        if let Some(date) = date {
            form.show_date = date;
        }
        if let Some(time) = time {
            form.show_time = time;
        }
    }

    view.submit(client).await.context("updating showtime")?;
    println!("showtime {} updated", id.0);
    Ok(())
}

async fn films_list(client: &AdminClient) -> Result<()> {
    let films = client.list_films().await.context("loading films")?;
    for film in &films {
        println!("{:<8} {}", film.film_id.0, film.film_name);
    }
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{raw}', expected YYYY-MM-DD"))
}

fn parse_time(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .with_context(|| format!("invalid time '{raw}', expected HH:MM"))
}
