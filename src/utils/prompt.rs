//! 控制台交互

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};

use crate::models::{Account, DEFAULT_NUM_LIKES};

/// 交互式输入一个账号
pub fn prompt_account() -> Result<Account> {
    let username = read_line("Threads 用户名: ")?;
    if username.is_empty() {
        bail!("用户名不能为空");
    }

    let password = rpassword::prompt_password("Threads 密码: ").context("读取密码失败")?;

    let count = read_line(&format!("点赞投稿数（默认 {}）: ", DEFAULT_NUM_LIKES))?;
    let num_likes = parse_like_count(&count)?;

    Ok(Account::new(username, password.trim(), num_likes))
}

/// 等待用户按下回车
pub fn wait_for_enter() {
    let _ = read_line("按回车键退出...");
}

/// 解析点赞数量；空输入使用默认值
pub fn parse_like_count(input: &str) -> Result<usize> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(DEFAULT_NUM_LIKES);
    }
    input
        .parse()
        .with_context(|| format!("无效的数量: {}", input))
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
