//! Statically compiled route registry.
//!
//! Every admin module declares its route tree here; the list is what the
//! client-declared route source hands to the registrar.

use super::record::{RouteRecord, ViewKey};

pub const LOGIN_PATH: &str = "/login";
pub const NOT_FOUND_PATH: &str = "/404";

/// Routes that never require authorization.
pub fn basic_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::new("Login", LOGIN_PATH, "login").title("登录页").hidden(),
        RouteRecord::new("404", NOT_FOUND_PATH, "not_found").title("404").hidden(),
    ]
}

fn home() -> RouteRecord {
    RouteRecord::new("Home", "/", ViewKey::LAYOUT)
        .redirect("/home")
        .catalogue()
        .order(0)
        .child(
            RouteRecord::new("HomePage", "home", "home")
                .title("首页")
                .icon("ic:sharp-home"),
        )
}

fn article() -> RouteRecord {
    RouteRecord::new("Article", "/article", ViewKey::LAYOUT)
        .redirect("/article/list")
        .title("文章管理")
        .icon("ic:twotone-article")
        .order(1)
        .child(
            RouteRecord::new("ArticleWrite", "write", "article/write")
                .title("发布文章")
                .icon("icon-park-outline:write"),
        )
        .child(
            RouteRecord::new("ArticleList", "list", "article/list")
                .title("文章列表")
                .icon("material-symbols:format-list-bulleted")
                .order(1),
        )
        .child(
            RouteRecord::new("ArticleEdit", "write/:id", "article/write")
                .title("编辑文章")
                .hidden(),
        )
        .child(
            RouteRecord::new("CategoryList", "category", "article/category")
                .title("分类管理")
                .icon("tabler:category")
                .order(2),
        )
        .child(
            RouteRecord::new("TagList", "tag", "article/tag")
                .title("标签管理")
                .icon("tabler:tag")
                .order(3),
        )
}

fn message() -> RouteRecord {
    RouteRecord::new("Message", "/message", ViewKey::LAYOUT)
        .redirect("/message/comment")
        .title("消息管理")
        .icon("ic:twotone-email")
        .order(2)
        .child(
            RouteRecord::new("CommentList", "comment", "message/comment")
                .title("评论管理")
                .icon("ic:twotone-comment"),
        )
        .child(
            RouteRecord::new("LeaveMsgList", "leave-msg", "message/leave-msg")
                .title("留言管理")
                .icon("ic:twotone-message")
                .order(1),
        )
}

fn user() -> RouteRecord {
    RouteRecord::new("User", "/user", ViewKey::LAYOUT)
        .redirect("/user/list")
        .title("用户管理")
        .icon("ph:user-list-bold")
        .order(3)
        .child(
            RouteRecord::new("UserList", "list", "user/list")
                .title("用户列表")
                .icon("mdi:account"),
        )
        .child(
            RouteRecord::new("OnlineUser", "online", "user/online")
                .title("在线用户")
                .icon("ic:outline-online-prediction")
                .order(1),
        )
}

fn auth() -> RouteRecord {
    RouteRecord::new("Auth", "/auth", ViewKey::LAYOUT)
        .redirect("/auth/menu")
        .title("权限管理")
        .icon("cib:adguard")
        .order(4)
        .child(
            RouteRecord::new("MenuList", "menu", "auth/menu")
                .title("菜单管理")
                .icon("ic:twotone-menu-book"),
        )
        .child(
            RouteRecord::new("ResourceList", "resource", "auth/resource")
                .title("接口管理")
                .icon("mdi:api")
                .order(1),
        )
        .child(
            RouteRecord::new("RoleList", "role", "auth/role")
                .title("角色管理")
                .icon("carbon:user-role")
                .order(2),
        )
}

fn setting() -> RouteRecord {
    RouteRecord::new("Setting", "/setting", ViewKey::LAYOUT)
        .redirect("/setting/website")
        .title("系统管理")
        .icon("ion:settings-sharp")
        .order(5)
        .child(
            RouteRecord::new("Website", "website", "setting/website")
                .title("网站管理")
                .icon("el:website"),
        )
        .child(
            RouteRecord::new("PageList", "page", "setting/page")
                .title("页面管理")
                .icon("iconoir:journal-page")
                .order(1),
        )
        .child(
            RouteRecord::new("FriendLinkList", "link", "setting/link")
                .title("友链管理")
                .icon("mdi:telegram")
                .order(2),
        )
        .child(
            RouteRecord::new("About", "about", "setting/about")
                .title("关于我")
                .icon("cib:about-me")
                .order(3),
        )
}

fn logs() -> RouteRecord {
    RouteRecord::new("Log", "/log", ViewKey::LAYOUT)
        .redirect("/log/operation")
        .title("日志管理")
        .icon("material-symbols:receipt-long-outline-rounded")
        .order(6)
        .child(
            RouteRecord::new("OperationLog", "operation", "log/operation")
                .title("操作日志")
                .icon("mdi:book-open-page-variant-outline"),
        )
        .child(
            RouteRecord::new("LoginLog", "login", "log/login")
                .title("登录日志")
                .icon("material-symbols:login")
                .order(1),
        )
}

fn profile() -> RouteRecord {
    RouteRecord::new("Profile", "/profile", ViewKey::LAYOUT)
        .redirect("/profile/index")
        .catalogue()
        .hidden()
        .order(99)
        .child(
            RouteRecord::new("ProfilePage", "index", "profile")
                .title("个人中心")
                .icon("mdi:account"),
        )
}

/// Route trees of every admin module, in menu order.
pub fn route_modules() -> Vec<RouteRecord> {
    vec![home(), article(), message(), user(), auth(), setting(), logs(), profile()]
}

const VIEWS: &[&str] = &[
    "login",
    "not_found",
    "home",
    "article/write",
    "article/list",
    "article/category",
    "article/tag",
    "message/comment",
    "message/leave-msg",
    "user/list",
    "user/online",
    "auth/menu",
    "auth/resource",
    "auth/role",
    "setting/website",
    "setting/page",
    "setting/link",
    "setting/about",
    "log/operation",
    "log/login",
    "profile",
];

/// Whether a view key has a page behind it.
pub fn is_known_view(key: &ViewKey) -> bool {
    key.is_layout() || VIEWS.contains(&key.as_str())
}
