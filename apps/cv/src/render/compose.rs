//! Section composer: turns a load state into the ordered document the page
//! template renders.
//!
//! Every collection keeps its source order (no sorting, no dedup). Each
//! optional block is gated independently through `presence`; the only
//! section that always renders for a populated profile is the quick-stats
//! summary.

use serde::Serialize;

use crate::loader::LoadState;
use crate::models::profile::{
    CertificationEntry, EducationEntry, ExperienceEntry, Profile, ProjectEntry,
};
use crate::render::format::{format_currency, format_date};
use crate::render::presence::{self, Presence};
use crate::render::theme::{Theme, Themed};

/// Shown in place of a missing experience end date.
pub const ONGOING: &str = "Actual";
/// Featured achievements are cut to this many, in source order.
pub const FEATURED_LIMIT: usize = 6;
/// Local fallback avatar, served from the assets directory.
pub const LOCAL_AVATAR: &str = "/avatar.jpg";
/// Placeholder glyph when the name yields no initials.
const NO_INITIALS: &str = "🙂";
const SKELETON_CARDS: [usize; 3] = [6, 4, 10];

// ────────────────────────────────────────────────────────────────────────────
// Document model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Document {
    theme: Theme,
    toggle_href: String,
    pub top_links: Vec<Link>,
    pub body: Body,
}

impl Document {
    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_href(&self) -> &str {
        &self.toggle_href
    }

    /// The populated page, if any.
    pub fn page(&self) -> Option<&Page> {
        match &self.body {
            Body::Populated(page) => Some(page),
            _ => None,
        }
    }
}

impl Themed for Document {
    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.toggle_href = toggle_href(theme);
    }
}

fn toggle_href(theme: Theme) -> String {
    format!("/?theme={}", theme.toggled().as_str())
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Body {
    Loading { skeletons: Vec<usize> },
    Error { message: String },
    Populated(Page),
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub header: Header,
    pub sections: Vec<Section>,
    pub footer: Footer,
}

impl Page {
    pub fn section(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.key == key)
    }

    pub fn section_keys(&self) -> Vec<&'static str> {
        self.sections.iter().map(|s| s.key).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Header {
    pub name: String,
    pub title: Option<String>,
    pub badges: Vec<String>,
    pub avatar_src: String,
    pub initials: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Footer {
    pub updated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub key: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub body: SectionBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionBody {
    Stats { items: Vec<Stat> },
    Achievements { items: Vec<FeaturedAchievement> },
    Lead { text: String },
    Fields { items: Vec<Field> },
    Chips { items: Vec<String> },
    Tags { items: Vec<String> },
    Timeline { items: Vec<ExperienceBlock> },
    Education { items: Vec<EducationBlock> },
    Projects { items: Vec<ProjectBlock> },
    Certifications { items: Vec<CertificationBlock> },
    Links { items: Vec<Link> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stat {
    pub value: usize,
    pub label: &'static str,
}

/// Labeled contact value; `href` set when the value is an outbound link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceBlock {
    /// `company — role`
    pub heading: String,
    pub location: Option<String>,
    pub dates: DateRange,
    pub description: Option<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationBlock {
    pub institution: String,
    pub degree: Option<String>,
    /// Only when both endpoints are known; never half a range.
    pub dates: Option<DateRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectBlock {
    pub name: String,
    pub role: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificationBlock {
    pub name: String,
    pub issuer: Option<String>,
    pub date: Option<String>,
    pub credential_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickStats {
    pub experience: usize,
    pub projects: usize,
    pub certifications: usize,
    pub skills: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturedAchievement {
    pub company: String,
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Composition
// ────────────────────────────────────────────────────────────────────────────

/// Builds the document for a load state. The theme starts light; callers
/// set it through `ThemeContext::apply`.
pub fn compose(state: &LoadState) -> Document {
    let (top_links, body) = match state {
        LoadState::Loading => (
            Vec::new(),
            Body::Loading {
                skeletons: SKELETON_CARDS.to_vec(),
            },
        ),
        LoadState::Error(e) => (
            Vec::new(),
            Body::Error {
                message: e.message().to_string(),
            },
        ),
        LoadState::Populated(profile) => (top_links(profile), Body::Populated(page(profile))),
    };

    let theme = Theme::default();
    Document {
        theme,
        toggle_href: toggle_href(theme),
        top_links,
        body,
    }
}

fn top_links(p: &Profile) -> Vec<Link> {
    [
        ("Portafolio", &p.portfolio_url),
        ("GitHub", &p.github_url),
        ("LinkedIn", &p.linkedin_url),
    ]
    .into_iter()
    .filter_map(|(label, url)| {
        presence::text(url).map(|href| Link {
            label: label.to_string(),
            href: href.to_string(),
        })
    })
    .collect()
}

pub fn page(p: &Profile) -> Page {
    let mut sections = vec![Section {
        key: "quick_stats",
        title: "Resumen rápido",
        icon: "📈",
        body: SectionBody::Stats {
            items: quick_stats(p).items(),
        },
    }];

    let featured = featured_achievements(p);
    if featured.is_present() {
        sections.push(Section {
            key: "featured",
            title: "Logros destacados",
            icon: "🏆",
            body: SectionBody::Achievements { items: featured },
        });
    }

    if let Some(summary) = presence::text(&p.summary) {
        sections.push(Section {
            key: "summary",
            title: "Resumen",
            icon: "📝",
            body: SectionBody::Lead {
                text: summary.to_string(),
            },
        });
    }

    let contact = contact_fields(p);
    if contact.is_present() {
        sections.push(Section {
            key: "contact",
            title: "Contacto",
            icon: "📬",
            body: SectionBody::Fields { items: contact },
        });
    }

    push_strings(&mut sections, "languages", "Idiomas", "🌐", &p.languages, false);
    push_strings(&mut sections, "skills", "Habilidades técnicas", "🧠", &p.skills, false);
    push_strings(&mut sections, "soft_skills", "Habilidades blandas", "🤝", &p.soft_skills, false);
    push_strings(&mut sections, "interests", "Intereses", "✨", &p.interests, true);

    if p.experience.is_present() {
        sections.push(Section {
            key: "experience",
            title: "Experiencia",
            icon: "💼",
            body: SectionBody::Timeline {
                items: p.experience.iter().map(experience_block).collect(),
            },
        });
    }

    if p.education.is_present() {
        sections.push(Section {
            key: "education",
            title: "Educación",
            icon: "🎓",
            body: SectionBody::Education {
                items: p.education.iter().map(education_block).collect(),
            },
        });
    }

    if p.projects.is_present() {
        sections.push(Section {
            key: "projects",
            title: "Proyectos",
            icon: "🧩",
            body: SectionBody::Projects {
                items: p.projects.iter().map(project_block).collect(),
            },
        });
    }

    if p.certifications.is_present() {
        sections.push(Section {
            key: "certifications",
            title: "Certificaciones",
            icon: "🏅",
            body: SectionBody::Certifications {
                items: p.certifications.iter().map(certification_block).collect(),
            },
        });
    }

    if p.extra_links.is_present() {
        sections.push(Section {
            key: "extra_links",
            title: "Redes",
            icon: "🔗",
            body: SectionBody::Links {
                items: p
                    .extra_links
                    .iter()
                    .map(|(label, href)| Link {
                        label: label.clone(),
                        href: href.clone(),
                    })
                    .collect(),
            },
        });
    }

    Page {
        header: header(p),
        sections,
        footer: Footer {
            updated: p
                .updated_at
                .as_deref()
                .map(format_date)
                .filter(|s| s.is_present())
                .unwrap_or_else(|| "—".to_string()),
        },
    }
}

fn push_strings(
    sections: &mut Vec<Section>,
    key: &'static str,
    title: &'static str,
    icon: &'static str,
    items: &[String],
    as_tags: bool,
) {
    if !items.is_present() {
        return;
    }
    let items = items.to_vec();
    let body = if as_tags {
        SectionBody::Tags { items }
    } else {
        SectionBody::Chips { items }
    };
    sections.push(Section {
        key,
        title,
        icon,
        body,
    });
}

fn header(p: &Profile) -> Header {
    let mut badges = Vec::new();
    if let Some(location) = presence::text(&p.location) {
        badges.push(location.to_string());
    }
    if p.remote_work.is_present() {
        badges.push("Remoto".to_string());
    }
    if let Some(availability) = presence::text(&p.availability) {
        badges.push(availability.to_string());
    }
    let salary = format_currency(presence::amount(p.desired_salary));
    if salary.is_present() {
        badges.push(format!("Salario deseado {salary}"));
    }

    Header {
        name: p.full_name.clone(),
        title: presence::text(&p.title).map(str::to_string),
        badges,
        avatar_src: presence::text(&p.photo_url)
            .unwrap_or(LOCAL_AVATAR)
            .to_string(),
        initials: initials(&p.full_name),
    }
}

/// First letter of the first two name parts, uppercased.
pub fn initials(full_name: &str) -> String {
    let initials: String = full_name
        .split_whitespace()
        .take(2)
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    if initials.is_empty() {
        NO_INITIALS.to_string()
    } else {
        initials
    }
}

fn contact_fields(p: &Profile) -> Vec<Field> {
    let plain = |label, value: &Option<String>| {
        presence::text(value).map(|v| Field {
            label,
            value: v.to_string(),
            href: None,
        })
    };
    let link = |label, value: &Option<String>| {
        presence::text(value).map(|v| Field {
            label,
            value: v.to_string(),
            href: Some(v.to_string()),
        })
    };
    let birth_date = presence::text(&p.birth_date).map(|d| Field {
        label: "Fecha de nacimiento",
        value: format_date(d),
        href: None,
    });

    [
        plain("Correo", &p.email),
        plain("Teléfono", &p.phone),
        link("Sitio web", &p.website),
        link("LinkedIn", &p.linkedin_url),
        link("GitHub", &p.github_url),
        link("Portafolio", &p.portfolio_url),
        plain("Nacionalidad", &p.nationality),
        birth_date,
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn experience_block(e: &ExperienceEntry) -> ExperienceBlock {
    ExperienceBlock {
        heading: format!("{} — {}", e.company, e.role),
        location: presence::text(&e.location).map(str::to_string),
        dates: DateRange {
            start: e.start.clone().unwrap_or_default(),
            end: presence::text(&e.end).unwrap_or(ONGOING).to_string(),
        },
        description: presence::text(&e.description).map(str::to_string),
        achievements: e.achievements.clone(),
    }
}

fn education_block(e: &EducationEntry) -> EducationBlock {
    EducationBlock {
        institution: e.institution.clone(),
        degree: presence::text(&e.degree).map(str::to_string),
        dates: match (presence::text(&e.start), presence::text(&e.end)) {
            (Some(start), Some(end)) => Some(DateRange {
                start: start.to_string(),
                end: end.to_string(),
            }),
            _ => None,
        },
    }
}

fn project_block(e: &ProjectEntry) -> ProjectBlock {
    ProjectBlock {
        name: e.name.clone(),
        role: presence::text(&e.role).map(str::to_string),
        url: presence::text(&e.url).map(str::to_string),
        description: presence::text(&e.description).map(str::to_string),
        technologies: e.technologies.clone(),
    }
}

fn certification_block(e: &CertificationEntry) -> CertificationBlock {
    CertificationBlock {
        name: e.name.clone(),
        issuer: presence::text(&e.issuer).map(str::to_string),
        date: presence::text(&e.date).map(format_date),
        credential_url: presence::text(&e.credential_url).map(str::to_string),
    }
}

pub fn quick_stats(p: &Profile) -> QuickStats {
    QuickStats {
        experience: p.experience.len(),
        projects: p.projects.len(),
        certifications: p.certifications.len(),
        skills: p.skills.len(),
    }
}

impl QuickStats {
    fn items(self) -> Vec<Stat> {
        vec![
            Stat { value: self.experience, label: "Experiencias" },
            Stat { value: self.projects, label: "Proyectos" },
            Stat { value: self.certifications, label: "Certificaciones" },
            Stat { value: self.skills, label: "Skills" },
        ]
    }
}

/// All achievements across experience entries, tagged with their company,
/// in traversal order, cut to `FEATURED_LIMIT`.
pub fn featured_achievements(p: &Profile) -> Vec<FeaturedAchievement> {
    p.experience
        .iter()
        .flat_map(|e| {
            e.achievements.iter().map(|a| FeaturedAchievement {
                company: e.company.clone(),
                text: a.clone(),
            })
        })
        .take(FEATURED_LIMIT)
        .collect()
}
