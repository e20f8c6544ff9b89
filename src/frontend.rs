use crate::controller;
use web_sys::window;
use yew::prelude::*;

const NAV_SECTIONS: &[(&str, &str)] = &[
    ("#about", "About"),
    ("#projects", "Projects"),
    ("#skills", "Skills"),
    ("#contact", "Contact"),
];

struct Project {
    title: &'static str,
    summary: &'static str,
    stack: &'static [&'static str],
    href: &'static str,
}

const PROJECTS: &[Project] = &[
    Project {
        title: "Heat-wave forecaster",
        summary: "Sequence model that predicts multi-day heat events from station data.",
        stack: &["Python", "PyTorch", "PostgreSQL"],
        href: "https://github.com/",
    },
    Project {
        title: "Trip planner",
        summary: "Assisted flight search with natural-language filters.",
        stack: &["TypeScript", "React", "Rust"],
        href: "https://github.com/",
    },
    Project {
        title: "Delivery console",
        summary: "Internal tool tracking equipment orders from request to hand-off.",
        stack: &["Rust", "Axum", "SQLite"],
        href: "https://github.com/",
    },
];

const SKILL_GROUPS: &[(&str, &[&str])] = &[
    ("Languages", &["Rust", "Python", "TypeScript", "Java", "C++", "SQL"]),
    ("Web", &["WebAssembly", "Yew", "React", "HTML", "CSS"]),
    ("Tooling", &["Git", "Docker", "Linux", "CI"]),
];

const CONTACTS: &[(&str, &str, &str)] = &[
    ("Email", "hello@example.com", "mailto:hello@example.com"),
    ("GitHub", "github.com", "https://github.com/"),
    ("LinkedIn", "linkedin.com", "https://www.linkedin.com/"),
];

#[derive(Properties, PartialEq)]
struct SectionProps {
    id: AttrValue,
    heading: AttrValue,
    children: Html,
}

#[function_component(Section)]
fn section(props: &SectionProps) -> Html {
    html! {
        <section id={props.id.clone()} class="section loading">
            <h2 class="section-title">{props.heading.clone()}</h2>
            {props.children.clone()}
        </section>
    }
}

fn project_card(project: &Project) -> Html {
    html! {
        <article class="project-card">
            <h3>{project.title}</h3>
            <p class="muted">{project.summary}</p>
            <ul class="tag-list">
                { for project.stack.iter().map(|tag| html! { <li class="tag">{*tag}</li> }) }
            </ul>
            <a class="btn btn-secondary" href={project.href} target="_blank" rel="noopener noreferrer">
                {"Source"}
            </a>
        </article>
    }
}

#[function_component(App)]
fn app() -> Html {
    use_effect_with((), move |_| {
        controller::install();
        || ()
    });

    html! {
        <>
            <div id="particles" class="particles" aria-hidden="true"></div>
            <nav id="navbar" class="navbar">
                <a class="nav-brand" href="#home">{"portfolio"}</a>
                <ul class="nav-links">
                    { for NAV_SECTIONS.iter().map(|(href, label)| html! {
                        <li><a href={*href}>{*label}</a></li>
                    }) }
                </ul>
            </nav>

            <main>
                <section id="home" class="intro loading">
                    <h1>{"Hi, I build things for the web."}</h1>
                    <p class="muted">{"Software engineer working on reliable tools, small services and the odd visual experiment."}</p>
                    <div class="intro-actions">
                        <a class="btn btn-primary" href="#projects">{"View work"}</a>
                        <a class="btn btn-secondary" href="#contact">{"Get in touch"}</a>
                    </div>
                </section>

                <Section id="about" heading="About">
                    <p>
                        {"I like systems that stay out of the way: fast builds, clear errors and interfaces that explain themselves."}
                    </p>
                </Section>

                <Section id="projects" heading="Projects">
                    <div class="project-grid">
                        { for PROJECTS.iter().map(project_card) }
                    </div>
                </Section>

                <Section id="skills" heading="Skills">
                    { for SKILL_GROUPS.iter().map(|(group, items)| html! {
                        <div class="skill-group">
                            <h3>{*group}</h3>
                            <div class="skill-list">
                                { for items.iter().map(|item| html! { <span class="skill-item">{*item}</span> }) }
                            </div>
                        </div>
                    }) }
                </Section>

                <Section id="contact" heading="Contact">
                    <div class="contact-grid">
                        { for CONTACTS.iter().map(|(label, value, href)| html! {
                            <a class="contact-item" href={*href}>
                                <span class="contact-label">{*label}</span>
                                <span class="contact-value">{*value}</span>
                            </a>
                        }) }
                    </div>
                </Section>
            </main>

            <footer class="site-footer">
                <p class="muted">{"Built with Rust and WebAssembly."}</p>
            </footer>
        </>
    }
}

pub fn run() {
    console_error_panic_hook::set_once();

    match window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
    {
        Some(root) => yew::Renderer::<App>::with_root(root).render(),
        None => yew::Renderer::<App>::new().render(),
    };
}
