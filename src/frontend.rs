use std::rc::Rc;
use std::time::Duration;

use gloo::timers::callback::Timeout;
use js_sys::{Array, Date};
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    MouseEvent, Storage,
};
use yew::prelude::*;

use crate::config::SiteConfig;
use crate::content::{self, CategoryFilter, Portfolio};
use crate::error::SiteError;
use crate::logging::Logger;
use crate::page::{self, MenuState, Section, TimelineSide, HERO_ID};
use crate::parallax::{Bounds, PointerParallax};
use crate::theme::{Theme, ThemeState, ThemeStore, ThemeSurface, THEME_KEY};
use crate::typing::{TypingAnimator, TypingStep};
use crate::visibility::{self, IntersectionSample, IntersectionSource};

const MOUNT_ID: &str = "app";

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

fn system_prefers_dark() -> bool {
    window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn timer_millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

fn current_year() -> u32 {
    Date::new_0().get_full_year()
}

struct BrowserThemeStore {
    logger: Logger,
}

impl ThemeStore for BrowserThemeStore {
    fn load(&self) -> Option<Theme> {
        let value = local_storage()?.get_item(THEME_KEY).ok().flatten()?;
        Theme::from_str(&value)
    }

    fn save(&self, theme: Theme) -> bool {
        let persisted = local_storage()
            .map(|storage| storage.set_item(THEME_KEY, theme.as_str()).is_ok())
            .unwrap_or(false);

        if !persisted {
            self.logger.debug(
                "theme.persist_skipped",
                json!({ "theme": theme.as_str(), "reason": "storage unavailable" }),
            );
        }

        persisted
    }
}

struct DocumentRoot;

impl ThemeSurface for DocumentRoot {
    fn apply(&self, theme: Theme) {
        if let Some(document) = window().and_then(|w| w.document()) {
            if let Some(root) = document.document_element() {
                let _ = root.set_attribute("data-theme", theme.as_str());
            }
        }
    }
}

type BrowserThemeState = ThemeState<BrowserThemeStore, DocumentRoot>;

struct BrowserViewport;

/// Keeps an observer alive; dropping it stops observing the target.
struct ObserverGuard {
    observer: IntersectionObserver,
    target: Element,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        self.observer.unobserve(&self.target);
        self.observer.disconnect();
    }
}

impl IntersectionSource for BrowserViewport {
    type Target = Element;
    type Subscription = ObserverGuard;

    fn observe(
        &self,
        target: &Element,
        threshold: f64,
        mut on_change: Box<dyn FnMut(IntersectionSample)>,
    ) -> Option<ObserverGuard> {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                        on_change(IntersectionSample::new(
                            entry.intersection_ratio(),
                            entry.is_intersecting(),
                        ));
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .ok()?;
        observer.observe(target);

        Some(ObserverGuard {
            observer,
            target: target.clone(),
            _callback: callback,
        })
    }
}

#[hook]
fn use_on_screen(threshold: f64) -> (NodeRef, bool) {
    let node = use_node_ref();
    let visible = use_state_eq(|| false);

    {
        let visible = visible.clone();
        use_effect_with((node.clone(), threshold), move |(node, threshold)| {
            let subscription = node.cast::<Element>().and_then(|target| {
                visibility::watch(&BrowserViewport, &target, *threshold, move |now| {
                    visible.set(now)
                })
            });
            move || drop(subscription)
        });
    }

    (node, *visible)
}

/// Drives `source` with one pending timeout at a time. A change of texts or
/// timings restarts the animation from the first text.
#[hook]
fn use_typing_effect(source: TypingAnimator) -> AttrValue {
    let animator = use_state_eq(|| source.clone());

    {
        let handle = animator.clone();
        use_effect_with(
            ((*animator).clone(), source),
            move |(current, source)| {
                let timeout = match current.next_step(source) {
                    TypingStep::Schedule { delay, next } => {
                        Some(Timeout::new(timer_millis(delay), move || handle.set(next)))
                    }
                    TypingStep::Restart(restarted) => {
                        handle.set(restarted);
                        None
                    }
                };
                move || drop(timeout)
            },
        );
    }

    AttrValue::from(animator.displayed().to_string())
}

#[derive(Properties, PartialEq)]
struct ExternalLinkProps {
    href: AttrValue,
    label: AttrValue,
    #[prop_or_default]
    class: Classes,
}

#[function_component(ExternalLink)]
fn external_link(props: &ExternalLinkProps) -> Html {
    html! {
        <a
            class={classes!("link", props.class.clone())}
            href={props.href.clone()}
            target="_blank"
            rel="noopener noreferrer"
        >
            {props.label.clone()}
            <span class="external-mark" aria-hidden="true">{"↗"}</span>
            <span class="sr-only">{" (opens in a new tab)"}</span>
        </a>
    }
}

#[derive(Properties, PartialEq)]
struct RevealSectionProps {
    section: Section,
    threshold: f64,
    #[prop_or_default]
    class: Classes,
    #[prop_or_default]
    children: Children,
}

#[function_component(RevealSection)]
fn reveal_section(props: &RevealSectionProps) -> Html {
    let (node, visible) = use_on_screen(props.threshold);

    html! {
        <section
            id={props.section.id()}
            ref={node}
            class={classes!("section-block", page::section_class(visible), props.class.clone())}
            aria-label={props.section.label()}
        >
            { props.children.clone() }
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct HeroImageProps {
    src: AttrValue,
    alt: AttrValue,
    multiplier: f64,
}

#[function_component(HeroImage)]
fn hero_image(props: &HeroImageProps) -> Html {
    let image = use_node_ref();
    let parallax = use_state_eq(|| PointerParallax::new(props.multiplier));

    let onmousemove = {
        let image = image.clone();
        let parallax = parallax.clone();
        Callback::from(move |event: MouseEvent| {
            let Some(element) = image.cast::<Element>() else {
                return;
            };
            let rect = element.get_bounding_client_rect();
            let mut next = *parallax;
            next.pointer_moved(
                f64::from(event.client_x()),
                f64::from(event.client_y()),
                Bounds::new(rect.left(), rect.top(), rect.width(), rect.height()),
            );
            parallax.set(next);
        })
    };

    let onmouseleave = {
        let parallax = parallax.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = *parallax;
            next.pointer_left();
            parallax.set(next);
        })
    };

    let style = format!("transform: {};", parallax.offset().to_css_transform());

    html! {
        <img
            class="hero-image"
            src={props.src.clone()}
            alt={props.alt.clone()}
            ref={image}
            style={style}
            onmousemove={onmousemove}
            onmouseleave={onmouseleave}
        />
    }
}

#[derive(Properties, PartialEq)]
struct SkillsMarqueeProps {
    skills: Rc<Vec<String>>,
}

#[function_component(SkillsMarquee)]
fn skills_marquee(props: &SkillsMarqueeProps) -> Html {
    let paused = use_state_eq(|| false);
    let rows = page::marquee_rows(&props.skills);

    let onmouseenter = {
        let paused = paused.clone();
        Callback::from(move |_: MouseEvent| paused.set(true))
    };
    let onmouseleave = {
        let paused = paused.clone();
        Callback::from(move |_: MouseEvent| paused.set(false))
    };

    let row = |items: &[String], direction: &'static str, variant: &'static str| {
        html! {
            <div class={classes!("marquee-track", variant)}>
                <div
                    class={classes!("marquee-row", direction, paused.then_some("paused"))}
                    onmouseenter={onmouseenter.clone()}
                    onmouseleave={onmouseleave.clone()}
                >
                    { for items.iter().map(|skill| html! {
                        <span class="skill-chip">{skill.clone()}</span>
                    }) }
                </div>
            </div>
        }
    };

    html! {
        <>
            <div class="marquee-mobile">
                { row(rows.mobile[0].as_slice(), "slide-left", "compact") }
                { row(rows.mobile[1].as_slice(), "slide-right", "compact") }
            </div>
            <div class="marquee-desktop">
                { row(rows.desktop.as_slice(), "slide-left", "wide") }
            </div>
        </>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectsProps {
    portfolio: Rc<Portfolio>,
    typing: TypingAnimator,
    logger: Logger,
}

#[function_component(Projects)]
fn projects(props: &ProjectsProps) -> Html {
    let active_filter = use_state_eq(CategoryFilter::default);
    let animated_title = use_typing_effect(props.typing.clone());

    let categories = content::categories(&props.portfolio.projects);
    let visible_projects = content::filter_projects(&props.portfolio.projects, &active_filter);

    html! {
        <>
            <div class="section-heading">
                <h2>{"Professional Projects"}</h2>
                <h3 class="typing-title" aria-live="polite">{animated_title}</h3>
            </div>

            <div class="filter-bar" role="group" aria-label="Filter projects by category">
                { for categories.into_iter().map(|label| {
                    let selected = active_filter.label() == label;
                    let onclick = {
                        let active_filter = active_filter.clone();
                        let logger = props.logger;
                        let label = label.clone();
                        Callback::from(move |_: MouseEvent| {
                            logger.debug("projects.filtered", json!({ "category": label }));
                            active_filter.set(CategoryFilter::select(&label));
                        })
                    };
                    html! {
                        <button
                            key={label.clone()}
                            type="button"
                            class={classes!("filter-chip", selected.then_some("is-active"))}
                            aria-pressed={selected.to_string()}
                            onclick={onclick}
                        >
                            {label}
                        </button>
                    }
                }) }
            </div>

            <div class="project-grid">
                { for visible_projects.into_iter().map(|project| html! {
                    <article key={project.title.clone()} class="card">
                        <h3>{project.title.clone()}</h3>
                        <p class="muted">{project.description.clone()}</p>
                        <ExternalLink
                            href={project.live_url.clone()}
                            label="Live Demo"
                        />
                    </article>
                }) }
            </div>
        </>
    }
}

#[derive(Properties, PartialEq)]
struct PageProps {
    portfolio: Rc<Portfolio>,
    config: SiteConfig,
    typing: TypingAnimator,
    logger: Logger,
    theme: Theme,
    on_toggle_theme: Callback<MouseEvent>,
}

#[function_component(Page)]
fn page_view(props: &PageProps) -> Html {
    let menu = use_state_eq(MenuState::default);
    let profile = &props.portfolio.profile;
    let threshold = props.config.visibility_threshold;

    let on_toggle_menu = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.set(menu.toggled()))
    };
    let on_nav_selected = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.set(menu.closed()))
    };

    let nav_links = |onclick: Option<Callback<MouseEvent>>| {
        html! {
            <>
                { for Section::ALL.iter().map(|section| html! {
                    <a
                        key={section.id()}
                        class="nav-link"
                        href={section.href()}
                        onclick={onclick.clone()}
                    >
                        {section.label()}
                    </a>
                }) }
            </>
        }
    };
    let menu_icon = if menu.is_open() { "✕" } else { "☰" };

    html! {
        <>
            <a class="skip-link" href={Section::About.href()}>{"Skip to main content"}</a>
            <header class="site-header">
                <nav class="nav-bar" aria-label="Primary">
                    <a class="brand" href={format!("#{HERO_ID}")} aria-label={profile.name.clone()}>
                        { for page::staggered_name(&profile.name).into_iter().map(|glyph| html! {
                            <span class="bouncing-char" style={glyph.style()} aria-hidden="true">
                                {glyph.glyph.to_string()}
                            </span>
                        }) }
                    </a>
                    <div class="nav-desktop">{ nav_links(None) }</div>
                    <div class="nav-actions">
                        <button
                            class="theme-toggle"
                            type="button"
                            aria-label={props.theme.toggle_label()}
                            aria-pressed={props.theme.pressed().to_string()}
                            onclick={props.on_toggle_theme.clone()}
                        >
                            <span aria-hidden="true">{props.theme.icon()}</span>
                        </button>
                        <button
                            class="menu-toggle"
                            type="button"
                            aria-label={menu.toggle_label()}
                            aria-expanded={menu.is_open().to_string()}
                            onclick={on_toggle_menu}
                        >
                            <span aria-hidden="true">{menu_icon}</span>
                        </button>
                    </div>
                </nav>
                <div class={classes!("nav-mobile", menu.is_open().then_some("is-open"))}>
                    { nav_links(Some(on_nav_selected)) }
                </div>
            </header>

            <main id="content">
                <section id={HERO_ID} class="hero">
                    <div class="hero-copy">
                        <h1>{profile.name.clone()}</h1>
                        <p class="hero-title">{profile.title.clone()}</p>
                        <div class="hero-actions">
                            <a class="button primary" href={Section::Projects.href()}>{"View My Work"}</a>
                            <a class="button accent" href={Section::Contact.href()}>{"Get In Touch"}</a>
                        </div>
                    </div>
                    <div class="hero-media">
                        <HeroImage
                            src={profile.hero_image.clone()}
                            alt={profile.hero_image_alt.clone()}
                            multiplier={props.config.parallax_multiplier}
                        />
                    </div>
                </section>

                <RevealSection section={Section::About} threshold={threshold}>
                    <h2>{"About Me"}</h2>
                    <div class="card">
                        <p>{profile.summary.clone()}</p>
                    </div>
                </RevealSection>

                <RevealSection section={Section::Skills} threshold={threshold}>
                    <h2>{"Technical Skills"}</h2>
                    <SkillsMarquee skills={Rc::new(props.portfolio.skills.clone())} />
                </RevealSection>

                <RevealSection section={Section::Projects} threshold={threshold}>
                    <Projects
                        portfolio={props.portfolio.clone()}
                        typing={props.typing.clone()}
                        logger={props.logger}
                    />
                </RevealSection>

                <RevealSection section={Section::Experience} threshold={threshold}>
                    <h2>{"Work Experience"}</h2>
                    <div class="timeline">
                        { for props.portfolio.experience.iter().enumerate().map(|(index, job)| html! {
                            <div key={index} class={TimelineSide::for_index(index).class()}>
                                <div class="timeline-date"><p>{job.dates.clone()}</p></div>
                                <div class="timeline-card card">
                                    <h4>{job.role.clone()}</h4>
                                    <p>{job.company.clone()}</p>
                                    <ul>
                                        { for job.details.iter().map(|detail| html! { <li>{detail.clone()}</li> }) }
                                    </ul>
                                    if let Some(certificate) = job.certificate.clone() {
                                        <ExternalLink href={certificate} label="Certificate" />
                                    }
                                </div>
                            </div>
                        }) }
                    </div>
                </RevealSection>

                <RevealSection section={Section::Education} threshold={threshold}>
                    <h2>{"Education"}</h2>
                    <div class="education-grid">
                        { for props.portfolio.education.iter().map(|entry| html! {
                            <div class="card">
                                <h4>{entry.degree.clone()}</h4>
                                <p>{format!("{} | {}", entry.institution, entry.dates)}</p>
                            </div>
                        }) }
                    </div>
                </RevealSection>

                <RevealSection section={Section::Contact} threshold={threshold} class="contact">
                    <h2>{"Get In Touch"}</h2>
                    <p>{"I'm currently seeking new opportunities. Feel free to connect with me!"}</p>
                    <div class="contact-links">
                        <a class="link" href={profile.social.mailto()}>{"Email"}</a>
                        <ExternalLink href={profile.social.linkedin.clone()} label="LinkedIn" />
                        <ExternalLink href={profile.social.github.clone()} label="GitHub" />
                        <a
                            class="link"
                            href={profile.resume_path.clone()}
                            download={profile.resume_file_name.clone()}
                        >
                            {"Resume"}
                        </a>
                    </div>
                </RevealSection>
            </main>

            <footer class="site-footer">
                <p>{format!("© {} {}. All rights reserved.", current_year(), profile.name)}</p>
            </footer>
        </>
    }
}

#[function_component(LoadingIndicator)]
fn loading_indicator() -> Html {
    html! {
        <div class="loading-screen" role="status" aria-live="polite">
            <span class="spinner" aria-hidden="true"></span>
            <span class="sr-only">{"Loading"}</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    portfolio: Rc<Portfolio>,
    config: SiteConfig,
    typing: TypingAnimator,
    logger: Logger,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let logger = props.logger;
    let theme_state = use_mut_ref(|| -> BrowserThemeState {
        ThemeState::init(BrowserThemeStore { logger }, DocumentRoot, system_prefers_dark())
    });
    let theme = use_state_eq(|| theme_state.borrow().get());
    let gate = props.config.loading_gate();
    let loading = use_state_eq(|| gate.is_some());

    {
        let loading = loading.clone();
        use_effect_with((), move |_| {
            let timeout = gate.map(|delay| {
                Timeout::new(timer_millis(delay), move || {
                    logger.debug("site.ready", json!({ "delayMs": timer_millis(delay) }));
                    loading.set(false);
                })
            });
            move || drop(timeout)
        });
    }

    let on_toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_: MouseEvent| {
            let next = theme_state.borrow_mut().toggle();
            logger.info("theme.toggled", json!({ "theme": next.as_str() }));
            theme.set(next);
        })
    };

    if *loading {
        return html! { <LoadingIndicator /> };
    }

    html! {
        <Page
            portfolio={props.portfolio.clone()}
            config={props.config.clone()}
            typing={props.typing.clone()}
            logger={logger}
            theme={*theme}
            on_toggle_theme={on_toggle_theme}
        />
    }
}

pub fn run() -> Result<(), SiteError> {
    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(MOUNT_ID))
        .ok_or(SiteError::MissingMountPoint(MOUNT_ID))?;

    let config = SiteConfig::from_lookup(|key| root.get_attribute(&format!("data-{key}")));
    let logger = Logger::new(config.log_level);
    let portfolio = Portfolio::embedded()?;
    let typing = TypingAnimator::new(
        portfolio.project_titles(),
        config.typing_speed,
        config.pause_delay,
    )?;

    logger.info(
        "site.starting",
        json!({
            "config": config.to_log_fields(),
            "content": portfolio.to_log_fields(),
        }),
    );

    yew::Renderer::<App>::with_root_and_props(
        root,
        AppProps {
            portfolio: Rc::new(portfolio),
            config,
            typing,
            logger,
        },
    )
    .render();

    Ok(())
}
