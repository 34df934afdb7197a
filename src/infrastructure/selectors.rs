//! 站点相关的选择器
//!
//! 页面结构变化时只需要修改这里。

/// 登录页用户名输入框
pub const USERNAME_INPUT: &str =
    "input[type='text'][class*='x1i10hfl'][class*='x1a2a7pz'], input[autocomplete='username']";

/// 登录页密码输入框
pub const PASSWORD_INPUT: &str = "input[type='password']";

/// 登录按钮（中日英三种文案）
pub const LOGIN_BUTTON_XPATH: &str = "//div[@role='button']//div[contains(text(), 'Log in') or contains(text(), 'ログイン') or contains(text(), '登录')]";

/// 投稿页评论区的"赞"按钮容器
pub const LIKE_BUTTON: &str = "div[role='button'][tabindex='0'] div.x6s0dn4";

/// "赞"按钮内的图标
pub const LIKE_ICON: &str = "svg[aria-label='「いいね！」'], svg[aria-label='Like']";

/// 首页中指向投稿的链接
pub const POST_LINK: &str = "a.x1i10hfl[href], a.x1lliihq[href]";

/// 投稿链接必须包含的路径片段
pub const POST_PATH_MARKER: &str = "/post/";

/// 平台限制提示弹窗
pub const RESTRICTION_DIALOG: &str = "div[role='dialog']";

/// 登录后才会下发的会话 Cookie
pub const SESSION_COOKIE: &str = "sessionid";

/// 按钮标记属性
pub const BUTTON_MARK_ATTR: &str = "data-autolike-id";
