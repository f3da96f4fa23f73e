mod dashboard;
mod render;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dashboard::Dashboard;
use hotelrevlib::{
    error::{HotelRevError, Result},
    features::BookingInput,
    filter::{parse_room_selector, FilterSpec, StayType},
    model::{RoomType, RoomTypePolicy},
    store::{DatasetStore, ModelStore},
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "hotelrev", version, about = "Аналитика и прогноз выручки отеля")]
struct Cli {
    /// CSV с бронированиями
    #[arg(long, env = "HOTEL_DATA", default_value = "Hotel_bookings_MLdata.csv")]
    data: PathBuf,

    /// JSON-артефакт регрессионной модели
    #[arg(long, env = "HOTEL_MODEL", default_value = "revenue_model.json")]
    model: PathBuf,

    /// Разрешать строки с несколькими флагами категории (побеждает первый)
    #[arg(long, env = "HOTEL_LENIENT_ROOM_TYPE")]
    lenient_room_type: bool,

    /// Формат вывода
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Dashboard(DashboardCommand),
    /// Интерактивный режим: команды построчно из stdin
    Shell,
}

#[derive(Subcommand, Debug, Clone)]
enum DashboardCommand {
    /// Превью данных, KPI и графики по всему датасету
    Overview(OverviewArgs),
    /// KPI и графики с фильтрами
    Analyze(AnalyzeArgs),
    /// Прогноз выручки для гипотетического бронирования
    Predict(PredictArgs),
}

#[derive(Args, Debug, Clone)]
struct OverviewArgs {
    /// Сколько строк показать в превью
    #[arg(long, default_value_t = 5)]
    preview: usize,
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    /// Категория номера: All, Executive, Standard, Suite
    #[arg(long, default_value = "All")]
    room: String,

    /// Тип проживания: all, weekend, weekday
    #[arg(long, default_value = "all")]
    stay: StayType,

    /// Вывести отфильтрованные строки
    #[arg(long)]
    records: bool,
}

#[derive(Args, Debug, Clone)]
struct PredictArgs {
    #[arg(long, default_value_t = 2)]
    stay_days: u32,

    #[arg(long, default_value_t = 5000)]
    room_price: u32,

    #[arg(long, default_value_t = 500)]
    service_cost: u32,

    /// Дата заезда YYYY-MM-DD (по умолчанию сегодня)
    #[arg(long)]
    checkin: Option<NaiveDate>,

    #[arg(long, default_value = "Standard")]
    room: RoomType,
}

impl PredictArgs {
    fn to_input(&self) -> Result<BookingInput> {
        let checkin = self.checkin.unwrap_or_else(|| Local::now().date_naive());
        BookingInput::new(
            self.stay_days,
            self.room_price,
            self.service_cost,
            checkin,
            self.room,
        )
    }
}

/// Одна строка интерактивного режима.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "hotelrev>", disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    #[command(flatten)]
    Dashboard(DashboardCommand),
    /// Выйти
    #[command(alias = "exit")]
    Quit,
}

fn init_tracing() {
    // stdout занят отчётами, логи — в stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotelrev=info,hotelrevlib=info".into()),
        )
        .init();
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let policy = if cli.lenient_room_type {
        RoomTypePolicy::FirstWins
    } else {
        RoomTypePolicy::Strict
    };
    let dashboard = Dashboard::new(
        DatasetStore::new(&cli.data, policy),
        ModelStore::new(&cli.model),
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Dashboard(cmd) => run(&dashboard, cmd, cli.format, &mut out)?,
        Command::Shell => {
            // датасет грузится при старте сессии: ошибка загрузки фатальна
            dashboard.dataset()?;
            shell(&dashboard, cli.format, io::stdin().lock(), &mut out)?;
        }
    }

    out.flush().map_err(HotelRevError::from)
}

fn run<W: Write>(
    dashboard: &Dashboard,
    cmd: &DashboardCommand,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match cmd {
        DashboardCommand::Overview(args) => {
            let report = dashboard.overview(args.preview)?;
            match format {
                OutputFormat::Text => render::overview(out, &report),
                OutputFormat::Json => render::json(out, &report),
            }
        }
        DashboardCommand::Analyze(args) => {
            let spec = FilterSpec::new(parse_room_selector(&args.room)?, args.stay);
            let report = dashboard.analyze(spec, args.records)?;
            match format {
                OutputFormat::Text => render::analysis(out, &report),
                OutputFormat::Json => render::json(out, &report),
            }
        }
        DashboardCommand::Predict(args) => {
            // ввод проверяется до любого обращения к модели
            let input = args.to_input()?;
            let forecast = dashboard.predict(&input)?;
            match format {
                OutputFormat::Text => render::forecast(out, &forecast),
                OutputFormat::Json => render::json(out, &forecast),
            }
        }
    }
}

/// Каждая строка — отдельное взаимодействие: ошибка в одной не ломает сессию.
fn shell<R: BufRead, W: Write>(
    dashboard: &Dashboard,
    format: OutputFormat,
    input: R,
    out: &mut W,
) -> Result<()> {
    write!(out, "hotelrev> ")?;
    out.flush()?;
    for line in input.lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if !words.is_empty() {
            match ShellLine::try_parse_from(words) {
                Ok(ShellLine { command: ShellCommand::Quit }) => break,
                Ok(ShellLine { command: ShellCommand::Dashboard(cmd) }) => {
                    if let Err(e) = run(dashboard, &cmd, format, out) {
                        tracing::warn!(error = %e, "command failed");
                        writeln!(out, "error: {e}")?;
                    }
                }
                Err(e) => writeln!(out, "{e}")?,
            }
        }
        write!(out, "hotelrev> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}
