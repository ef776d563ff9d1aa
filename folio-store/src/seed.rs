//! Startup seeding with fixture content.
//!
//! Inserts a small set of published blog posts and featured projects when
//! every collection is empty, so a fresh local store serves a populated
//! site immediately. Skipped as soon as any collection holds data.

use chrono::{DateTime, TimeZone, Utc};
use mongodb::bson::doc;
use tracing::info;
use uuid::Uuid;

use folio_core::constants::DEFAULT_AUTHOR;
use folio_core::error::FolioResult;
use folio_models::blog::{BlogCategory, BlogPost};
use folio_models::project::{Project, ProjectCategory};
use folio_models::slug::slugify;

use crate::db::{timed, Database};

/// Seed fixture data if all collections are empty. Returns whether
/// anything was inserted.
pub async fn seed_if_empty(db: &Database) -> FolioResult<bool> {
    let limit = db.op_timeout();

    let contacts = timed(limit, "contacts.count", db.contacts().count_documents(doc! {})).await?;
    let posts = timed(limit, "blog.count", db.blog_posts().count_documents(doc! {})).await?;
    let projects = timed(limit, "projects.count", db.projects().count_documents(doc! {})).await?;

    if contacts > 0 || posts > 0 || projects > 0 {
        info!("collections already contain data, skipping seeding");
        return Ok(false);
    }

    let blog_fixtures = blog_fixtures();
    let project_fixtures = project_fixtures();

    timed(
        limit,
        "blog.insert_many",
        db.blog_posts().insert_many(&blog_fixtures),
    )
    .await?;
    timed(
        limit,
        "projects.insert_many",
        db.projects().insert_many(&project_fixtures),
    )
    .await?;

    info!(
        "seeded {} blog posts and {} projects",
        blog_fixtures.len(),
        project_fixtures.len()
    );
    Ok(true)
}

fn fixture_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn blog_fixture(
    title: &str,
    excerpt: &str,
    content: &str,
    category: BlogCategory,
    tags: &[&str],
    read_time: &str,
    date: DateTime<Utc>,
) -> BlogPost {
    BlogPost {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        slug: slugify(title),
        excerpt: excerpt.to_string(),
        content: content.to_string(),
        author: DEFAULT_AUTHOR.to_string(),
        category,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        image: None,
        read_time: Some(read_time.to_string()),
        published: true,
        created_at: date,
        updated_at: date,
    }
}

fn blog_fixtures() -> Vec<BlogPost> {
    vec![
        blog_fixture(
            "The Future of AI in Web Development",
            "Exploring how artificial intelligence is reshaping the web development landscape.",
            "The intersection of artificial intelligence and web development is creating \
             unprecedented opportunities for innovation. Machine learning is being integrated \
             directly into web applications, from personalized recommendations to automated \
             testing, and AI-powered tooling is streamlining the coding process itself.",
            BlogCategory::Ai,
            &["AI", "Web Development", "Future Tech"],
            "8 min read",
            fixture_date(2024, 1, 15),
        ),
        blog_fixture(
            "Building Scalable APIs with FastAPI",
            "A guide to creating high-performance APIs with modern Python practices.",
            "FastAPI combines high performance, automatic interactive documentation, and type \
             safety. Its async-first design handles thousands of concurrent requests, and its \
             validation layer keeps endpoints robust. This post walks through database \
             integration, error handling, and deployment strategies.",
            BlogCategory::Backend,
            &["Python", "FastAPI", "Backend"],
            "12 min read",
            fixture_date(2024, 1, 10),
        ),
        blog_fixture(
            "React Performance Optimization Tips",
            "Essential techniques for faster React applications.",
            "React applications slow down when re-renders go unchecked. Strategic use of memo \
             hooks, code splitting, lazy-loaded assets, and disciplined state management keeps \
             bundles small and interactions snappy. This guide covers each technique with \
             practical examples.",
            BlogCategory::Frontend,
            &["React", "Performance", "Frontend"],
            "10 min read",
            fixture_date(2024, 1, 5),
        ),
    ]
}

fn project_fixture(
    name: &str,
    description: &str,
    tech_stack: &[&str],
    category: ProjectCategory,
    order: i32,
    date: DateTime<Utc>,
) -> Project {
    Project {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        description: description.to_string(),
        tech_stack: tech_stack.iter().map(|t| t.to_string()).collect(),
        category,
        image: None,
        demo_url: None,
        github_url: None,
        featured: true,
        order,
        created_at: date,
        updated_at: date,
    }
}

fn project_fixtures() -> Vec<Project> {
    vec![
        project_fixture(
            "AI Chatbot Assistant",
            "GPT-powered assistant integrated with a CRM for customer support and lead generation.",
            &["OpenAI", "LangChain", "React", "Node.js", "MongoDB"],
            ProjectCategory::AiMl,
            1,
            fixture_date(2024, 1, 1),
        ),
        project_fixture(
            "E-commerce Platform",
            "Scalable storefront with an admin panel, cart system, and payment integration.",
            &["PHP", "CodeIgniter 3", "MySQL", "AJAX", "Bootstrap"],
            ProjectCategory::FullStack,
            2,
            fixture_date(2024, 1, 2),
        ),
        project_fixture(
            "AI Resume Generator",
            "Generates tailored resumes from form input using GPT.",
            &["Next.js", "OpenAI", "Tailwind CSS", "Firebase"],
            ProjectCategory::AiMl,
            3,
            fixture_date(2024, 1, 3),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_fixtures_have_unique_slugs() {
        let posts = blog_fixtures();
        let mut slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), posts.len());
    }

    #[test]
    fn test_blog_fixtures_are_published_and_valid() {
        for post in blog_fixtures() {
            assert!(post.published);
            assert!(!post.slug.is_empty());
            assert_eq!(post.author, "Amit");
            assert!(post.tags.len() <= 10);
        }
    }

    #[test]
    fn test_project_fixtures_have_manual_order() {
        let projects = project_fixtures();
        let orders: Vec<i32> = projects.iter().map(|p| p.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        for project in &projects {
            assert!(!project.tech_stack.is_empty());
            assert!(project.tech_stack.len() <= 20);
        }
    }

    #[test]
    fn test_fixture_slug_matches_title_derivation() {
        let posts = blog_fixtures();
        assert_eq!(posts[0].slug, "the-future-of-ai-in-web-development");
    }
}
