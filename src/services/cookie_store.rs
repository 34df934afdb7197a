//! Cookie 存储服务 - 业务能力层
//!
//! 每个账号一个 JSON 文件：`<dir>/<账号名>.json`

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::StoredCookie;

/// 按账号保存会话 Cookie 的文件存储（无锁，不支持并发运行）
#[derive(Debug, Clone)]
pub struct CookieStore {
    dir: PathBuf,
}

impl CookieStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 账号对应的文件路径（非法字符替换为下划线）
    pub fn path_for(&self, username: &str) -> PathBuf {
        let mut name: String = username
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        if name.is_empty() || name.starts_with('.') {
            name.insert(0, '_');
        }
        self.dir.join(format!("{}.json", name))
    }

    /// 读取 Cookie；文件不存在时返回 None
    pub async fn load(&self, username: &str) -> AppResult<Option<Vec<StoredCookie>>> {
        let path = self.path_for(username);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(cookie_error(&path, e)),
        };

        let cookies: Vec<StoredCookie> = serde_json::from_str(&content)?;
        debug!("从 {} 读取了 {} 个 Cookie", path.display(), cookies.len());
        Ok(Some(cookies))
    }

    /// 保存 Cookie（覆盖旧文件）
    pub async fn save(&self, username: &str, cookies: &[StoredCookie]) -> AppResult<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| cookie_error(&self.dir, e))?;

        let path = self.path_for(username);
        let content = serde_json::to_string_pretty(cookies)?;
        fs::write(&path, content)
            .await
            .map_err(|e| cookie_error(&path, e))?;

        debug!("已将 {} 个 Cookie 写入 {}", cookies.len(), path.display());
        Ok(())
    }

    /// 删除 Cookie；文件不存在视为成功
    pub async fn delete(&self, username: &str) -> AppResult<()> {
        let path = self.path_for(username);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(cookie_error(&path, e)),
        }
    }
}

fn cookie_error(path: &Path, source: std::io::Error) -> AppError {
    AppError::CookieStore {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_load_then_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = CookieStore::new(dir.path().join("cookies"));
        let cookies = vec![StoredCookie::new("sessionid", "abc", ".threads.net")];

        assert!(store.load("alice").await.unwrap().is_none());

        store.save("alice", &cookies).await.unwrap();
        assert_eq!(store.load("alice").await.unwrap(), Some(cookies));

        store.delete("alice").await.unwrap();
        assert!(store.load("alice").await.unwrap().is_none());
        store.delete("alice").await.unwrap();
    }

    #[tokio::test]
    async fn save_overwrites_previous_set() {
        let dir = tempfile::tempdir().unwrap();
        let store = CookieStore::new(dir.path());

        store
            .save("bob", &[StoredCookie::new("sessionid", "old", ".threads.net")])
            .await
            .unwrap();
        store
            .save("bob", &[StoredCookie::new("sessionid", "new", ".threads.net")])
            .await
            .unwrap();

        let loaded = store.load("bob").await.unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].value, "new");
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = CookieStore::new(dir.path());
        std::fs::write(store.path_for("carol"), "not json").unwrap();

        tokio_test::assert_err!(store.load("carol").await);
        tokio_test::assert_ok!(store.delete("carol").await);
        assert!(tokio_test::assert_ok!(store.load("carol").await).is_none());
    }

    #[test]
    fn file_names_are_sanitized() {
        let store = CookieStore::new("/tmp/c");
        assert_eq!(store.path_for("a.b_c-d"), PathBuf::from("/tmp/c/a.b_c-d.json"));
        assert_eq!(store.path_for("../x"), PathBuf::from("/tmp/c/_.._x.json"));
        assert_eq!(store.path_for("me@mail"), PathBuf::from("/tmp/c/me_mail.json"));
    }
}
