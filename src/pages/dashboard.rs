//! Dashboard shell: sidebar navigation, user menu and section pages.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};

use super::PagesState;
use crate::assets::{escape, render_page};
use crate::auth::append_set_cookies;
use crate::guard::{DASHBOARD_PATH, LOGIN_PATH};
use crate::session::{self, RequestCookieStore, SessionState, UserProfile};

const PROFILE_PATH: &str = "/dashboard/cai-dat/tai-khoan";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
}

impl NavItem {
    /// The landing item only matches itself; others also match their subpages.
    pub fn is_active(&self, path: &str) -> bool {
        path == self.href || (self.href != DASHBOARD_PATH && path.starts_with(self.href))
    }
}

pub const MAIN_NAV: &[NavItem] = &[
    NavItem {
        href: DASHBOARD_PATH,
        label: "Home",
    },
    NavItem {
        href: "/dashboard/to-chuc",
        label: "Organizations",
    },
    NavItem {
        href: "/dashboard/nguoi-dung",
        label: "Users",
    },
    NavItem {
        href: "/dashboard/hoc-sinh",
        label: "Students",
    },
    NavItem {
        href: "/dashboard/lop-hoc",
        label: "Classes",
    },
    NavItem {
        href: "/dashboard/bai-kiem-tra",
        label: "Exams",
    },
    NavItem {
        href: "/dashboard/phieu-tra-loi",
        label: "Answer sheets",
    },
    NavItem {
        href: "/dashboard/thong-ke",
        label: "Statistics",
    },
];

pub const SETTINGS_NAV: NavItem = NavItem {
    href: "/dashboard/cai-dat",
    label: "Settings",
};

fn nav_html(items: &[NavItem], path: &str) -> String {
    let mut html = String::new();
    for item in items {
        let active = if item.is_active(path) {
            " class=\"active\" aria-current=\"page\""
        } else {
            ""
        };
        html.push_str(&format!(
            "      <a href=\"{}\"{}>{}</a>\n",
            item.href, active, item.label
        ));
    }
    html
}

/// Counters shown on the landing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub organizations: u32,
    pub teachers: u32,
    pub students: u32,
    pub classes: u32,
    pub exams: u32,
    pub answer_sheets: u32,
}

impl DashboardStats {
    /// Placeholder figures until the API exposes totals.
    pub fn sample() -> Self {
        Self {
            organizations: 5,
            teachers: 48,
            students: 542,
            classes: 24,
            exams: 36,
            answer_sheets: 1284,
        }
    }

    fn cards(&self) -> [(&'static str, u32, &'static str, &'static str); 6] {
        [
            (
                "Organizations",
                self.organizations,
                "Total organizations",
                "/dashboard/to-chuc",
            ),
            (
                "Teachers",
                self.teachers,
                "Total teachers",
                "/dashboard/nguoi-dung",
            ),
            (
                "Students",
                self.students,
                "Total students",
                "/dashboard/hoc-sinh",
            ),
            (
                "Classes",
                self.classes,
                "Active classes",
                "/dashboard/lop-hoc",
            ),
            (
                "Exams",
                self.exams,
                "Total exams",
                "/dashboard/bai-kiem-tra",
            ),
            (
                "Answer sheets",
                self.answer_sheets,
                "Answer sheets processed",
                "/dashboard/phieu-tra-loi",
            ),
        ]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Activity {
    pub actor: &'static str,
    pub action: &'static str,
    pub target: Option<&'static str>,
    pub minutes_ago: u32,
}

const SAMPLE_ACTIVITY: &[Activity] = &[
    Activity {
        actor: "Admin User",
        action: "created the organization",
        target: Some("THPT Chuyên KHTN"),
        minutes_ago: 0,
    },
    Activity {
        actor: "Teacher A",
        action: "added the exam",
        target: Some("Toán lớp 10 - HK1"),
        minutes_ago: 60,
    },
    Activity {
        actor: "Student B",
        action: "submitted an answer sheet for",
        target: Some("Lý lớp 11 - GK2"),
        minutes_ago: 120,
    },
];

/// "1,284"
fn format_count(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn relative_time(minutes: u32) -> String {
    match minutes {
        0 => "just now".to_string(),
        1..60 => format!("{} min ago", minutes),
        60..1440 => format!("{} h ago", minutes / 60),
        _ => format!("{} d ago", minutes / 1440),
    }
}

fn home_content(stats: &DashboardStats, activity: &[Activity]) -> String {
    let mut html = String::from(
        "<h1>Home</h1>\n<p class=\"muted\">Overview of your EduScan system.</p>\n<section class=\"stats\">\n",
    );
    for (label, value, note, href) in stats.cards() {
        html.push_str(&format!(
            "<article class=\"card stat\"><div class=\"label\">{}</div>\
             <div class=\"value\">{}</div><p class=\"muted small\">{}</p>\
             <a href=\"{}\" class=\"small\">View details &rarr;</a></article>\n",
            label,
            format_count(value),
            note,
            href
        ));
    }
    html.push_str("</section>\n<section class=\"panels\">\n");

    html.push_str(
        "<article class=\"card\"><h2>Recent activity</h2>\
         <p class=\"muted small\">Latest events across the system.</p>",
    );
    if activity.is_empty() {
        html.push_str("<p class=\"empty\">No recent activity.</p>");
    } else {
        html.push_str("<ul class=\"activity\">");
        for item in activity {
            let target = item
                .target
                .map(|t| format!(" <strong>{}</strong>", escape(t)))
                .unwrap_or_default();
            html.push_str(&format!(
                "<li><span>{}</span> <span class=\"muted\">{}</span>{}\
                 <br><span class=\"muted small\">{}</span></li>",
                escape(item.actor),
                escape(item.action),
                target,
                relative_time(item.minutes_ago)
            ));
        }
        html.push_str("</ul>");
    }
    html.push_str("</article>\n");

    html.push_str(
        "<article class=\"card\"><h2>Upcoming schedule</h2>\
         <p class=\"muted small\">Exams and events in the coming days.</p>\
         <p class=\"empty\">Nothing scheduled.</p></article>\n</section>\n",
    );
    html
}

fn profile_content(user: &UserProfile) -> String {
    format!(
        "<h1>Profile</h1>\n<section class=\"card\"><dl class=\"profile\">\
         <dt>Name</dt><dd>{}</dd><dt>Email</dt><dd>{}</dd>\
         <dt>Role</dt><dd>{}</dd><dt>User ID</dt><dd>{}</dd></dl></section>\n",
        escape(&user.name),
        escape(&user.email),
        escape(&user.role),
        user.id
    )
}

fn placeholder_content(title: &str) -> String {
    format!(
        "<h1>{}</h1>\n<section class=\"card\"><p class=\"empty\">This section is not available yet.</p></section>\n",
        escape(title)
    )
}

struct Page {
    status: StatusCode,
    title: &'static str,
    content: String,
}

fn section_page(path: &str, user: &UserProfile) -> Page {
    if path == PROFILE_PATH {
        return Page {
            status: StatusCode::OK,
            title: "Profile",
            content: profile_content(user),
        };
    }

    match MAIN_NAV
        .iter()
        .chain(std::iter::once(&SETTINGS_NAV))
        .find(|item| item.href == path)
    {
        Some(item) => Page {
            status: StatusCode::OK,
            title: item.label,
            content: placeholder_content(item.label),
        },
        None => Page {
            status: StatusCode::NOT_FOUND,
            title: "Not found",
            content: "<h1>Page not found</h1>\n<p class=\"muted\">This dashboard page does not exist.</p>\n"
                .to_string(),
        },
    }
}

/// Load the session from cookies and render `page` inside the shell.
///
/// Without a usable session the cached entries are cleared and the browser
/// is sent to the sign-in screen.
fn render_shell<F>(state: &PagesState, headers: &HeaderMap, path: &str, page: F) -> Response
where
    F: FnOnce(&UserProfile) -> Page,
{
    let mut store = RequestCookieStore::from_headers(headers, state.secure_cookies);
    let user = match session::bootstrap(&mut store) {
        SessionState::Active { user, .. } => user,
        SessionState::LoggedOut => {
            let mut response = Redirect::temporary(LOGIN_PATH).into_response();
            append_set_cookies(response.headers_mut(), store.into_set_cookies());
            return response;
        }
    };

    let page = page(&user);
    render_page(
        page.status,
        "dashboard.html",
        &[
            ("title", page.title),
            ("nav", &nav_html(MAIN_NAV, path)),
            (
                "settings_nav",
                &nav_html(std::slice::from_ref(&SETTINGS_NAV), path),
            ),
            ("user_name", &escape(&user.name)),
            ("user_initials", &escape(&user.initials())),
            ("user_email", &escape(&user.email)),
            ("content", &page.content),
        ],
    )
}

pub(super) async fn index(State(state): State<PagesState>, headers: HeaderMap) -> Response {
    render_shell(&state, &headers, DASHBOARD_PATH, |_| Page {
        status: StatusCode::OK,
        title: "Home",
        content: home_content(&DashboardStats::sample(), SAMPLE_ACTIVITY),
    })
}

pub(super) async fn section(
    State(state): State<PagesState>,
    Path(section): Path<String>,
    headers: HeaderMap,
) -> Response {
    let path = format!("{}/{}", DASHBOARD_PATH, section.trim_end_matches('/'));
    render_shell(&state, &headers, &path, |user| section_page(&path, user))
}
