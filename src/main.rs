// ==========================================
// 医生值班排班系统 - 批处理主入口
// ==========================================
// 用法:
//   duty-roster <roster.json> --start 2026-01-01 --end 2026-01-31 \
//       [--cap 6] [--seed N] [--schedule-id UUID] \
//       [--db roster.db] [--sql-out seed_schedule.sql]
// ==========================================

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use duty_roster::{
    db, logging, GenerationConfig, RoleSpec, ScheduleOrchestrator, ScheduleRepository,
    SqlScriptWriter, DEFAULT_SHIFT_CAP,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// 默认角色声明 (声明顺序 = 每日处理顺序)
fn default_roles() -> Vec<RoleSpec> {
    vec![
        RoleSpec::new("Junior Resident", "junior_resident"),
        RoleSpec::new("Intermediate Resident", "intermediate_resident"),
        RoleSpec::new("Senior Resident", "senior_resident"),
        RoleSpec::new("Attending", "attending"),
    ]
}

struct CliArgs {
    roster_path: PathBuf,
    start_date: NaiveDate,
    end_date: NaiveDate,
    shift_cap: u32,
    seed: Option<u64>,
    schedule_id: Option<Uuid>,
    db_path: Option<String>,
    sql_out: Option<PathBuf>,
}

fn parse_args() -> Result<CliArgs> {
    let mut args = std::env::args().skip(1);

    let mut roster_path: Option<PathBuf> = None;
    let mut start_date: Option<NaiveDate> = None;
    let mut end_date: Option<NaiveDate> = None;
    let mut shift_cap = DEFAULT_SHIFT_CAP;
    let mut seed: Option<u64> = None;
    let mut schedule_id: Option<Uuid> = None;
    let mut db_path: Option<String> = None;
    let mut sql_out: Option<PathBuf> = None;

    fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
        args.next()
            .with_context(|| format!("{} 缺少参数值", flag))
    }

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--start" => {
                start_date = Some(
                    NaiveDate::parse_from_str(&value(&mut args, "--start")?, "%Y-%m-%d")
                        .context("--start 需要 YYYY-MM-DD 格式")?,
                )
            }
            "--end" => {
                end_date = Some(
                    NaiveDate::parse_from_str(&value(&mut args, "--end")?, "%Y-%m-%d")
                        .context("--end 需要 YYYY-MM-DD 格式")?,
                )
            }
            "--cap" => {
                shift_cap = value(&mut args, "--cap")?
                    .parse()
                    .context("--cap 需要非负整数")?
            }
            "--seed" => {
                seed = Some(
                    value(&mut args, "--seed")?
                        .parse()
                        .context("--seed 需要 u64 整数")?,
                )
            }
            "--schedule-id" => {
                schedule_id = Some(
                    Uuid::parse_str(&value(&mut args, "--schedule-id")?)
                        .context("--schedule-id 需要合法 UUID")?,
                )
            }
            "--db" => db_path = Some(value(&mut args, "--db")?),
            "--sql-out" => sql_out = Some(PathBuf::from(value(&mut args, "--sql-out")?)),
            other if !other.starts_with("--") && roster_path.is_none() => {
                roster_path = Some(PathBuf::from(other))
            }
            other => bail!("未知参数: {}", other),
        }
    }

    Ok(CliArgs {
        roster_path: roster_path.context("缺少花名册 JSON 路径")?,
        start_date: start_date.context("缺少 --start")?,
        end_date: end_date.context("缺少 --end")?,
        shift_cap,
        seed,
        schedule_id,
        db_path,
        sql_out,
    })
}

fn main() -> Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 批处理排班", duty_roster::APP_NAME);
    tracing::info!("系统版本: {}", duty_roster::VERSION);
    tracing::info!("==================================================");

    let args = parse_args()?;

    // 种子缺省时随机取一个并记录,保证事后可复现
    let seed = args.seed.unwrap_or_else(rand::random::<u64>);
    let schedule_id = args.schedule_id.unwrap_or_else(Uuid::new_v4);
    tracing::info!(%schedule_id, seed, "本次运行参数");

    // 加载花名册
    let roster_json = std::fs::read_to_string(&args.roster_path)
        .with_context(|| format!("无法读取花名册: {}", args.roster_path.display()))?;
    let roster = duty_roster::load_roster(&roster_json, &default_roles())?;

    let config = GenerationConfig::new(
        schedule_id,
        args.start_date,
        args.end_date,
        args.shift_cap,
        seed,
    );
    let orchestrator = ScheduleOrchestrator::new();

    // 排班 (有 --db 则直接落库,否则纯计算)
    let (schedule, outcome) = match &args.db_path {
        Some(db_path) => {
            let conn = db::open_sqlite_connection(db_path)
                .with_context(|| format!("无法打开数据库: {}", db_path))?;
            let repo = ScheduleRepository::new(Arc::new(Mutex::new(conn)));
            let result = orchestrator.generate_and_persist(&roster, &config, &repo)?;
            (result.schedule, result.outcome)
        }
        None => orchestrator.generate(&roster, &config)?,
    };

    // 输出 SQL 脚本
    if let Some(sql_out) = &args.sql_out {
        SqlScriptWriter::new()
            .write_to_file(sql_out, &schedule, &outcome.assignments)
            .with_context(|| format!("无法写入 SQL 脚本: {}", sql_out.display()))?;
        tracing::info!(path = %sql_out.display(), "SQL 脚本已生成");
    }

    tracing::info!(
        assignments = outcome.assignments.len(),
        relaxations = outcome.relaxation_count(),
        unfilled = outcome.unfilled_count(),
        "排班结束"
    );

    if outcome.unfilled_count() > 0 {
        bail!("存在 {} 个缺岗 (日期, 角色),详见日志", outcome.unfilled_count());
    }

    Ok(())
}
