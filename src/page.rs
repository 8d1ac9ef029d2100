pub const HERO_ID: &str = "hero";
pub const MOBILE_MARQUEE_SPLIT: usize = 6;

const NAME_BOUNCE_STAGGER_MS: u32 = 50;
const NON_BREAKING_SPACE: char = '\u{00A0}';

/// Navigable page regions, in page order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Skills,
    Projects,
    Experience,
    Education,
    Contact,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::About,
        Section::Skills,
        Section::Projects,
        Section::Experience,
        Section::Education,
        Section::Contact,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Contact => "contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::About => "About",
            Self::Skills => "Skills",
            Self::Projects => "Projects",
            Self::Experience => "Experience",
            Self::Education => "Education",
            Self::Contact => "Contact",
        }
    }

    pub fn href(self) -> String {
        format!("#{}", self.id())
    }
}

/// Entrance class for a section; removed again when it scrolls away.
pub fn section_class(visible: bool) -> &'static str {
    if visible {
        "reveal is-visible"
    } else {
        "reveal"
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    /// Following a nav link always closes the panel.
    pub fn closed(self) -> Self {
        Self { open: false }
    }

    pub fn toggle_label(self) -> &'static str {
        if self.open {
            "Close navigation"
        } else {
            "Open navigation"
        }
    }
}

/// Skill rows for the scrolling marquee. Each row is its items twice over so
/// a half-width translation loops seamlessly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarqueeRows {
    pub desktop: Vec<String>,
    pub mobile: [Vec<String>; 2],
}

pub fn marquee_rows(skills: &[String]) -> MarqueeRows {
    let split = MOBILE_MARQUEE_SPLIT.min(skills.len());
    let (first, rest) = skills.split_at(split);

    MarqueeRows {
        desktop: looped(skills),
        mobile: [looped(first), looped(rest)],
    }
}

fn looped(items: &[String]) -> Vec<String> {
    items.iter().chain(items).cloned().collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NameGlyph {
    pub glyph: char,
    pub delay_ms: u32,
}

impl NameGlyph {
    pub fn style(self) -> String {
        format!("animation-delay: {:.2}s;", f64::from(self.delay_ms) / 1_000.0)
    }
}

/// Splits the header name into individually animated glyphs, each starting
/// a little after the previous one.
pub fn staggered_name(name: &str) -> Vec<NameGlyph> {
    name.chars()
        .zip(0u32..)
        .map(|(glyph, index)| NameGlyph {
            glyph: if glyph == ' ' { NON_BREAKING_SPACE } else { glyph },
            delay_ms: index * NAME_BOUNCE_STAGGER_MS,
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineSide {
    Left,
    Right,
}

impl TimelineSide {
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 1 {
            Self::Right
        } else {
            Self::Left
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Left => "timeline-item",
            Self::Right => "timeline-item right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(count: usize) -> Vec<String> {
        (0..count).map(|index| format!("skill-{index}")).collect()
    }

    #[test]
    fn menu_toggles_and_closes() {
        let menu = MenuState::default();
        assert!(!menu.is_open());

        let opened = menu.toggled();
        assert!(opened.is_open());
        assert!(!opened.toggled().is_open());
        assert!(!opened.closed().is_open());
        assert!(!menu.closed().is_open());
    }

    #[test]
    fn sections_have_stable_anchors() {
        let ids: Vec<&str> = Section::ALL.iter().map(|section| section.id()).collect();

        assert_eq!(
            ids,
            vec!["about", "skills", "projects", "experience", "education", "contact"]
        );
        assert_eq!(Section::Contact.href(), "#contact");
    }

    #[test]
    fn marquee_rows_loop_each_row() {
        let rows = marquee_rows(&skills(12));

        assert_eq!(rows.desktop.len(), 24);
        assert_eq!(rows.desktop[0], rows.desktop[12]);
        assert_eq!(rows.mobile[0].len(), 12);
        assert_eq!(rows.mobile[0][0], "skill-0");
        assert_eq!(rows.mobile[1][0], "skill-6");
        assert_eq!(rows.mobile[1][6], "skill-6");
    }

    #[test]
    fn short_skill_lists_leave_the_second_mobile_row_empty() {
        let rows = marquee_rows(&skills(4));

        assert_eq!(rows.mobile[0].len(), 8);
        assert!(rows.mobile[1].is_empty());
    }

    #[test]
    fn staggered_name_delays_each_glyph_and_keeps_spaces() {
        let glyphs = staggered_name("G Sai");

        assert_eq!(glyphs.len(), 5);
        assert_eq!(glyphs[1].glyph, '\u{00A0}');
        assert_eq!(glyphs[4].delay_ms, 200);
        assert_eq!(glyphs[4].style(), "animation-delay: 0.20s;");
    }

    #[test]
    fn timeline_alternates_sides() {
        assert_eq!(TimelineSide::for_index(0), TimelineSide::Left);
        assert_eq!(TimelineSide::for_index(1), TimelineSide::Right);
        assert_eq!(TimelineSide::for_index(2), TimelineSide::Left);
    }

    #[test]
    fn sections_only_reveal_while_visible() {
        assert_eq!(section_class(true), "reveal is-visible");
        assert_eq!(section_class(false), "reveal");
    }
}
