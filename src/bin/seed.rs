use consultant_marketplace_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    services::user_service::hash_password,
};
use sea_orm::SqlxPostgresConnector;
use uuid::Uuid;

struct ConsultantSeed {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    category: &'static str,
    bio: &'static str,
    experience: &'static str,
    qualifications: &'static [&'static str],
    skills: &'static [&'static str],
    regular_price: i64,
    online: bool,
}

const CONSULTANTS: &[ConsultantSeed] = &[
    ConsultantSeed {
        name: "Dr. Priya Sharma",
        email: "priya.sharma@example.com",
        phone: "+919876543210",
        category: "career",
        bio: "15+ years in career counseling and talent development.",
        experience: "15",
        qualifications: &["PhD in Organizational Psychology", "Certified Career Coach"],
        skills: &["Career Planning", "Resume Building", "Interview Preparation"],
        regular_price: 299,
        online: true,
    },
    ConsultantSeed {
        name: "Rajesh Kumar",
        email: "rajesh.kumar@example.com",
        phone: "+919876543211",
        category: "finance",
        bio: "Investment planning and wealth management for individuals.",
        experience: "12",
        qualifications: &["CFA Charterholder", "CA from ICAI"],
        skills: &["Investment Planning", "Tax Planning", "Retirement Planning"],
        regular_price: 399,
        online: false,
    },
    ConsultantSeed {
        name: "Dr. Anjali Patel",
        email: "anjali.patel@example.com",
        phone: "+919876543212",
        category: "wellness",
        bio: "Holistic wellness coach and mental health expert.",
        experience: "10",
        qualifications: &["MD in Psychiatry", "Certified Yoga Instructor"],
        skills: &["Stress Management", "Meditation", "Lifestyle Coaching"],
        regular_price: 349,
        online: true,
    },
    ConsultantSeed {
        name: "Rahul Mehta",
        email: "rahul.tech@example.com",
        phone: "+919876543215",
        category: "technology",
        bio: "Full-stack developer and cloud architecture consultant.",
        experience: "7",
        qualifications: &["B.Tech Computer Science", "AWS Certified Solutions Architect"],
        skills: &["Web Development", "Cloud Computing", "DevOps"],
        regular_price: 449,
        online: true,
    },
];

const FIRST_SESSION_PRICE: i64 = 99;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone())).await?;

    let admin_id = ensure_user(&pool, "admin@99consultant.com", "admin123", "Admin User", None, "admin").await?;

    for i in 1..=3 {
        let email = format!("client{i}@example.com");
        let phone = format!("+91987654320{i}");
        ensure_user(&pool, &email, "client123", &format!("Client {i}"), Some(&phone), "client").await?;
    }

    for seed in CONSULTANTS {
        let user_id = ensure_user(
            &pool,
            seed.email,
            "consultant123",
            seed.name,
            Some(seed.phone),
            "consultant",
        )
        .await?;
        ensure_profile(&pool, user_id, seed).await?;
    }

    println!("Seed completed. Admin ID: {admin_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    name: &str,
    phone: Option<&str>,
    role: &str,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, name, phone, role, email_verified_at, phone_verified)
        VALUES ($1, $2, $3, $4, $5, $6, NOW(), TRUE)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .bind(phone)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(id)
}

async fn ensure_profile(pool: &sqlx::PgPool, user_id: Uuid, seed: &ConsultantSeed) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO consultant_profiles (
            id, user_id, bio, experience, qualifications, skills, category,
            first_session_price, regular_session_price, is_approved, approval_date,
            is_online, profile_completed
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, TRUE, NOW(), $10, TRUE)
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(seed.bio)
    .bind(seed.experience)
    .bind(serde_json::json!(seed.qualifications))
    .bind(serde_json::json!(seed.skills))
    .bind(seed.category)
    .bind(FIRST_SESSION_PRICE)
    .bind(seed.regular_price)
    .bind(seed.online)
    .execute(pool)
    .await?;

    println!("Ensured consultant profile for {}", seed.email);
    Ok(())
}
