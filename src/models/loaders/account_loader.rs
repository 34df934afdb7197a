use crate::error::{AppError, AppResult};
use crate::models::account::{Account, AccountFile};
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

/// 加载账号列表
///
/// 文件不存在或格式错误时记录错误并返回空列表，调用方把空列表视为"无事可做"。
pub async fn load_accounts(path: &Path) -> Vec<Account> {
    match try_load_accounts(path).await {
        Ok(accounts) => {
            info!("✓ 已读取 {} 个账号", accounts.len());
            accounts
        }
        Err(e) => {
            error!("❌ {}", e);
            Vec::new()
        }
    }
}

/// 加载账号列表（保留错误原因）
///
/// `.toml` 文件使用 `[[accounts]]` 表数组，其他扩展名按 JSON 数组解析。
pub async fn try_load_accounts(path: &Path) -> AppResult<Vec<Account>> {
    let display = path.display().to_string();

    let content = fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::accounts_load(&display, "文件不存在")
        } else {
            AppError::accounts_load(&display, e)
        }
    })?;

    let accounts = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        toml::from_str::<AccountFile>(&content)
            .map_err(|e| AppError::accounts_load(&display, format!("TOML格式错误: {}", e)))?
            .accounts
    } else {
        serde_json::from_str::<Vec<Account>>(&content)
            .map_err(|e| AppError::accounts_load(&display, format!("JSON格式错误: {}", e)))?
    };

    Ok(accounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn loads_json_in_source_order() {
        let file = write_temp(
            ".json",
            r#"[
                {"username": "carol", "password": "c", "num_likes": 3},
                {"username": "alice", "password": "a"}
            ]"#,
        );

        let accounts = load_accounts(file.path()).await;
        let names: Vec<&str> = accounts.iter().map(|a| a.username.as_str()).collect();
        assert_eq!(names, vec!["carol", "alice"]);
        assert_eq!(accounts[0].num_likes, 3);
        assert_eq!(accounts[1].num_likes, 10);
    }

    #[tokio::test]
    async fn loads_toml_accounts_table() {
        let file = write_temp(
            ".toml",
            r#"
            [[accounts]]
            username = "dave"
            password = "d"
            num_likes = 7
            "#,
        );

        let accounts = load_accounts(file.path()).await;
        assert_eq!(accounts, vec![Account::new("dave", "d", 7)]);
    }

    #[tokio::test]
    async fn missing_file_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        assert!(load_accounts(&path).await.is_empty());
        let err = try_load_accounts(&path).await.unwrap_err();
        assert!(matches!(err, AppError::AccountsLoad { .. }));
    }

    #[tokio::test]
    async fn malformed_file_yields_empty() {
        let file = write_temp(".json", r#"{"username": "not-an-array"}"#);
        assert!(load_accounts(file.path()).await.is_empty());
    }
}
