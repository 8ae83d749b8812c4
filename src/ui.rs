// src/ui.rs

use crate::{
    constants,
    error::{AppError, AppResult},
    models::ResultSet,
    symbols, utils,
};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};

const MAX_CELL_WIDTH: usize = 24;

pub fn plain(message: &str) {
    println!("{}", message);
}

pub fn info(message: &str) {
    println!("{} {}", *symbols::INFO, message);
}

pub fn warn(message: &str) {
    println!("{} {}", *symbols::WARN, message.yellow());
}

pub fn error(message: &str) {
    eprintln!("{} {}", *symbols::ERROR, message.red());
}

pub fn print_header(title: &str) {
    println!("\n{}", "═".repeat(constants::UI_WIDTH));
    println!(" {}", title.cyan().bold());
    println!("{}", "═".repeat(constants::UI_WIDTH));
}

pub fn box_message(title: &str, content: &[&str], color_func: fn(ColoredString) -> ColoredString) {
    println!("\n┌{}┐", "─".repeat(constants::UI_WIDTH - 2));
    println!("  {}", color_func(title.bold()));
    println!("├{}┤", "─".repeat(constants::UI_WIDTH - 2));
    for line in content {
        println!("  {}", line);
    }
    println!("└{}┘", "─".repeat(constants::UI_WIDTH - 2));
}

pub fn prompt(message: &str, default: Option<&str>) -> io::Result<String> {
    let default_str = default.map_or("".to_string(), |d| format!(" (默认: {})", d));
    print!("\n>>> {}{}: ", message, default_str);
    io::stdout().flush()?;
    let mut input = String::new();
    // 读到 EOF 视为中断
    if io::stdin().read_line(&mut input)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }
    let input = input.trim().to_string();
    if input.is_empty() {
        Ok(default.unwrap_or("").to_string())
    } else {
        Ok(input)
    }
}

pub fn confirm(question: &str, default_yes: bool) -> bool {
    let options = if default_yes { "(Y/n)" } else { "(y/N)" };
    loop {
        match prompt(
            &format!("{} {} (按 {} 取消)", question, options, *symbols::CTRL_C),
            None,
        ) {
            Ok(choice) => {
                let choice = choice.to_lowercase();
                if choice == "y" {
                    return true;
                }
                if choice == "n" {
                    return false;
                }
                if choice.is_empty() {
                    return default_yes;
                }
                println!("{}", "无效输入，请输入 'y' 或 'n'。".red());
            }
            Err(_) => return false,
        }
    }
}

pub fn selection_menu(
    options: &[String],
    title: &str,
    instructions: &str,
    default_choice: &str,
) -> io::Result<String> {
    println!("\n┌{}┐", "─".repeat(constants::UI_WIDTH - 2));
    println!("  {}", title.cyan().bold());
    println!("├{}┤", "─".repeat(constants::UI_WIDTH - 2));

    let pad = options.len().to_string().len();
    for (i, option) in options.iter().enumerate() {
        println!(
            "  [{}] {}",
            format!("{:<pad$}", i + 1, pad = pad).yellow(),
            option
        );
    }

    println!("├{}┤", "─".repeat(constants::UI_WIDTH - 2));
    println!("  {} (按 {} 可取消)", instructions, *symbols::CTRL_C);
    println!("└{}┘", "─".repeat(constants::UI_WIDTH - 2));

    prompt("请输入你的选择", Some(default_choice))
}

/// 单选菜单，返回所选项的下标，输入无效时重新提示
pub fn choose_one(options: &[String], title: &str, default_choice: &str) -> AppResult<usize> {
    loop {
        let input = selection_menu(
            options,
            title,
            "请输入数字选择 (直接按回车使用默认值)",
            default_choice,
        )
        .map_err(|_| AppError::UserInterrupt)?;
        match input.trim().parse::<usize>() {
            Ok(idx) if idx > 0 && idx <= options.len() => return Ok(idx - 1),
            _ => eprintln!("\n{} 无效的选择 '{}'。", *symbols::ERROR, input),
        }
    }
}

/// 以表格形式打印查询结果，列标题随模式变化
pub fn print_results_table(result: &ResultSet) {
    let labels = result.mode.column_labels();
    let rows: Vec<Vec<String>> = result
        .records
        .iter()
        .map(|r| r.values().iter().map(|v| utils::truncate_text(v, MAX_CELL_WIDTH)).collect())
        .collect();

    let widths: Vec<usize> = (0..labels.len())
        .map(|col| {
            rows.iter()
                .map(|row| utils::display_width(&row[col]))
                .chain(std::iter::once(labels[col].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| {
                let pad = w.saturating_sub(utils::display_width(cell));
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join(" │ ")
    };

    let header: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
    println!("\n {}", render(&header).bold());
    println!(
        "─{}─",
        widths.iter().map(|w| "─".repeat(*w)).collect::<Vec<_>>().join("─┼─")
    );
    for row in &rows {
        println!(" {}", render(row));
    }
}

pub fn new_bytes_progress_bar(total: Option<u64>, prefix: &str) -> ProgressBar {
    let pbar = match total {
        Some(len) => {
            let style = ProgressStyle::with_template(
                "{prefix:7.bold.cyan} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, ETA: {eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
            ProgressBar::new(len).with_style(style)
        }
        None => {
            // 大小未知时只显示已下载字节数
            let style = ProgressStyle::with_template(
                "{prefix:7.bold.cyan} [{elapsed_precise}] {spinner} {bytes} ({bytes_per_sec})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
            ProgressBar::new_spinner().with_style(style)
        }
    };
    pbar.set_prefix(prefix.to_string());
    pbar
}
