use crate::config::AppConfig;
use crate::models::assessments::entities::AssessmentKind;
use crate::models::assessments::requests::CreateAssessmentRequest;
use crate::models::courses::entities::Course;
use crate::models::grades::requests::RecordGradeRequest;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::session::{SessionStore, register::get_session_store_plugin};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub session: Arc<dyn SessionStore>,
}

/// 创建会话存储实例
async fn create_session_store() -> Result<Arc<dyn SessionStore>, Box<dyn std::error::Error>> {
    let config = AppConfig::get();
    let store_type = &config.session.store_type;

    warn!("Attempting to create {} session store backend", store_type);

    // 根据配置选择会话存储后端
    if let Some(constructor) = get_session_store_plugin(store_type) {
        match constructor().await {
            Ok(store) => {
                warn!("Successfully created {} session store backend", store_type);
                return Ok(Arc::from(store));
            }
            Err(e) => {
                warn!("Failed to create {} session store: {}", store_type, e);
            }
        }
    } else {
        warn!("Session store backend '{}' not found in registry", store_type);
    }

    // 配置的后端不可用时回退到内存实现
    if store_type != "moka" {
        warn!("Falling back to Moka (in-memory) session store");
        if let Some(fallback_constructor) = get_session_store_plugin("moka") {
            match fallback_constructor().await {
                Ok(store) => {
                    warn!("Successfully created fallback Moka session store backend");
                    return Ok(Arc::from(store));
                }
                Err(fallback_e) => {
                    warn!("Failed to create fallback Moka session store: {}", fallback_e);
                }
            }
        }
    }

    Err(format!("No session store backend available (tried: {store_type})").into())
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认管理员账号
/// 如果存储中没有任何用户，则创建一个默认的 admin 账号
async fn seed_admin(storage: &Arc<dyn Storage>) {
    // 检查是否已有用户
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!("Storage already has {} user(s), skipping admin seed", count);
            return;
        }
        Ok(_) => {
            info!("No users found in storage, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    // 哈希密码
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    // 创建管理员账号
    let admin_request = CreateUserRequest {
        username: "admin".to_string(),
        display_name: "System Admin".to_string(),
        email: Some("admin@university.edu".to_string()),
        matric_number: None,
        password: password_hash,
        role: UserRole::Admin,
        courses: vec![],
        advisees: vec![],
    };

    match storage.create_user(admin_request).await {
        Ok(user) => {
            info!(
                "Default admin account created successfully (ID: {}, username: {})",
                user.id, user.username
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// 写入演示名册
///
/// 一名讲师、一名学生、一名导师，三门课程，CS101 配齐考核项与
/// 学生的两条已批改成绩。只在空库（仅有 admin）时执行。
async fn seed_demo_data(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 1 => {
            debug!("Storage already has {} users, skipping demo seed", count);
            return;
        }
        Ok(_) => {
            info!("Seeding demo roster...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping demo seed", e);
            return;
        }
    }

    let password = std::env::var("DEMO_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("Generated demo account password: {}", pwd);
        pwd
    });
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash demo password: {}, skipping demo seed", e);
            return;
        }
    };

    let lecturer = match storage
        .create_user(CreateUserRequest {
            username: "john-smith".to_string(),
            display_name: "Dr. John Smith".to_string(),
            email: Some("john.smith@university.edu".to_string()),
            matric_number: None,
            password: password_hash.clone(),
            role: UserRole::Lecturer,
            courses: vec!["CS101".to_string(), "CS201".to_string()],
            advisees: vec![],
        })
        .await
    {
        Ok(user) => user,
        Err(e) => {
            warn!("Failed to seed lecturer: {}", e);
            return;
        }
    };

    let student = match storage
        .create_user(CreateUserRequest {
            username: "alice-johnson".to_string(),
            display_name: "Alice Johnson".to_string(),
            email: None,
            matric_number: Some("STU001".to_string()),
            password: password_hash.clone(),
            role: UserRole::Student,
            courses: vec![
                "CS101".to_string(),
                "CS201".to_string(),
                "MATH101".to_string(),
            ],
            advisees: vec![],
        })
        .await
    {
        Ok(user) => user,
        Err(e) => {
            warn!("Failed to seed student: {}", e);
            return;
        }
    };

    if let Err(e) = storage
        .create_user(CreateUserRequest {
            username: "mary-wilson".to_string(),
            display_name: "Prof. Mary Wilson".to_string(),
            email: Some("mary.wilson@university.edu".to_string()),
            matric_number: None,
            password: password_hash,
            role: UserRole::Advisor,
            courses: vec![],
            advisees: vec![student.id],
        })
        .await
    {
        warn!("Failed to seed advisor: {}", e);
    }

    let courses = [
        Course {
            id: "CS101".to_string(),
            code: "CS101".to_string(),
            name: "Introduction to Computer Science".to_string(),
            lecturer_id: lecturer.id,
            credits: 3,
            semester: "2025/26-1".to_string(),
            students: vec![student.id],
        },
        Course {
            id: "CS201".to_string(),
            code: "CS201".to_string(),
            name: "Data Structures".to_string(),
            lecturer_id: lecturer.id,
            credits: 4,
            semester: "2025/26-1".to_string(),
            students: vec![student.id],
        },
        Course {
            id: "MATH101".to_string(),
            code: "MATH101".to_string(),
            name: "Calculus I".to_string(),
            lecturer_id: lecturer.id,
            credits: 3,
            semester: "2025/26-1".to_string(),
            students: vec![student.id],
        },
    ];
    for course in courses {
        if let Err(e) = storage.add_course(course).await {
            warn!("Failed to seed course: {}", e);
        }
    }

    let due = chrono::Utc::now() + chrono::Duration::days(14);
    let assessments = [
        ("Quiz 1", AssessmentKind::Quiz, 20.0, 10.0),
        ("Assignment 1", AssessmentKind::Assignment, 100.0, 25.0),
        ("Final Exam", AssessmentKind::Exam, 100.0, 35.0),
    ];
    let mut seeded_assessments = Vec::new();
    for (title, kind, total_marks, weightage) in assessments {
        match storage
            .add_assessment(CreateAssessmentRequest {
                title: title.to_string(),
                kind,
                course_id: "CS101".to_string(),
                total_marks,
                weightage,
                due_date: due,
                description: None,
            })
            .await
        {
            Ok(assessment) => seeded_assessments.push(assessment),
            Err(e) => warn!("Failed to seed assessment: {}", e),
        }
    }

    // 前两项已批改，期末未录入
    let marks = [18.0, 85.0];
    for (assessment, mark) in seeded_assessments.iter().zip(marks) {
        if let Err(e) = storage
            .add_grade(RecordGradeRequest {
                student_id: student.id,
                assessment_id: assessment.id,
                course_id: "CS101".to_string(),
                marks: Some(mark),
                feedback: None,
            })
            .await
        {
            warn!("Failed to seed grade: {}", e);
        }
    }

    info!("Demo roster seeded");
}

/// 准备服务器启动的上下文
/// 包括存储与会话存储的初始化、种子数据写入
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        crate::session::register::debug_session_store_registry();
        debug!("Debug mode: Session store registry is enabled");
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized");

    // 初始化默认管理员账号（如果需要）
    seed_admin(&storage).await;

    // 写入演示名册（如果开启）
    if AppConfig::get().seed.demo_data {
        seed_demo_data(&storage).await;
    }

    // 创建会话存储实例
    let session = create_session_store()
        .await
        .expect("Failed to create session store");
    warn!("Session store backend initialized");

    StartupContext { storage, session }
}
