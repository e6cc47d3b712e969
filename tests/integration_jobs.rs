mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    access_token, body_json, close_job, create_application, create_company, create_job,
    create_user, generate_unique_email, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, token: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn put_json(uri: &str, token: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Creates a job through the API and returns its id.
async fn post_job(app: &Router, token: &str, body: serde_json::Value) -> Uuid {
    let response = app
        .clone()
        .oneshot(post_json("/api/jobs", token, &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["id"].as_str().unwrap().parse().unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_company_requires_employer(pool: PgPool) {
    let seeker = create_user(&pool, &generate_unique_email(), "Testpass123", "seeker", true).await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &seeker).await;

    let response = app
        .oneshot(post_json(
            "/api/companies",
            &token,
            &json!({ "name": "Acme" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_company(pool: PgPool) {
    let employer =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &employer).await;

    let response = app
        .oneshot(post_json(
            "/api/companies",
            &token,
            &json!({ "name": "Acme", "description": "We make everything" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["name"], "Acme");
    assert_eq!(body["owner_id"], employer.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_company_by_non_owner_forbidden(pool: PgPool) {
    let owner =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let other =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let company = create_company(&pool, owner.id, "Acme").await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &other).await;

    let response = app
        .oneshot(put_json(
            &format!("/api/companies/{company}"),
            &token,
            &json!({ "name": "Hijacked" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(
        body["error"]["message"],
        "Not authorized to modify this company"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_company_as_admin(pool: PgPool) {
    let owner =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let admin = create_user(&pool, &generate_unique_email(), "Testpass123", "admin", true).await;
    let company = create_company(&pool, owner.id, "Acme").await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &admin).await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/companies/{company}"))
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/companies/{company}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_my_companies_lists_only_own(pool: PgPool) {
    let owner =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let other =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    create_company(&pool, owner.id, "Mine").await;
    create_company(&pool, other.id, "Theirs").await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &owner).await;

    let response = app
        .oneshot(get("/api/companies/my-companies", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Mine");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_job_for_own_company(pool: PgPool) {
    let employer =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let company = create_company(&pool, employer.id, "Acme").await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &employer).await;

    let response = app
        .oneshot(post_json(
            "/api/jobs",
            &token,
            &json!({
                "title": "Backend Engineer",
                "description": "Build the platform",
                "location": "Remote",
                "employment_type": "full_time",
                "salary_min": 60000,
                "salary_max": 90000,
                "required_skills": "rust, sql",
                "company_id": company
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["title"], "Backend Engineer");
    assert_eq!(body["employment_type"], "full_time");
    assert_eq!(body["status"], "open");
    assert_eq!(body["company_id"], company.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_job_for_other_company_forbidden(pool: PgPool) {
    let owner =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let other =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let company = create_company(&pool, owner.id, "Acme").await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &other).await;

    let response = app
        .oneshot(post_json(
            "/api/jobs",
            &token,
            &json!({
                "title": "Backend Engineer",
                "description": "Build the platform",
                "employment_type": "full_time",
                "company_id": company
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(
        body["error"]["message"],
        "Not authorized to create jobs for this company"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_job_with_inverted_salary_range(pool: PgPool) {
    let employer =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let company = create_company(&pool, employer.id, "Acme").await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &employer).await;

    let response = app
        .oneshot(post_json(
            "/api/jobs",
            &token,
            &json!({
                "title": "Backend Engineer",
                "description": "Build the platform",
                "employment_type": "full_time",
                "salary_min": 90000,
                "salary_max": 60000,
                "company_id": company
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(
        body["error"]["message"],
        "salary_min cannot be greater than salary_max"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_jobs_excludes_closed(pool: PgPool) {
    let employer =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let company = create_company(&pool, employer.id, "Acme").await;
    let open_job = create_job(&pool, company, "Open Role").await;
    let closed_job = create_job(&pool, company, "Closed Role").await;
    close_job(&pool, closed_job).await;

    let app = setup_test_app(pool.clone());

    let request = Request::builder()
        .method("GET")
        .uri("/api/jobs")
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], open_job.to_string());
    assert_eq!(data[0]["company_name"], "Acme");
    assert_eq!(body["meta"]["total"], 1);

    // the closed job is still reachable by id
    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/jobs/{closed_job}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "closed");
    assert_eq!(body["company_name"], "Acme");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_jobs_salary_filter_keeps_unbounded(pool: PgPool) {
    let employer =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let company = create_company(&pool, employer.id, "Acme").await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &employer).await;

    let low_paying = post_job(
        &app,
        &token,
        json!({
            "title": "Junior Role",
            "description": "Entry level",
            "employment_type": "full_time",
            "salary_min": 30000,
            "salary_max": 60000,
            "company_id": company
        }),
    )
    .await;

    let unadvertised = post_job(
        &app,
        &token,
        json!({
            "title": "Mystery Role",
            "description": "Salary on request",
            "employment_type": "full_time",
            "company_id": company
        }),
    )
    .await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/jobs?salary_min=70000")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    // the job topping out at 60k is gone; the one with no advertised range
    // is kept rather than punished for silence
    let body = body_json(response).await;
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|job| job["id"].as_str().unwrap())
        .collect();
    assert!(!ids.contains(&low_paying.to_string().as_str()));
    assert!(ids.contains(&unadvertised.to_string().as_str()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_jobs_skills_filter(pool: PgPool) {
    let employer =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let company = create_company(&pool, employer.id, "Acme").await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &employer).await;

    let rust_job = post_job(
        &app,
        &token,
        json!({
            "title": "Systems Engineer",
            "description": "Low level work",
            "employment_type": "full_time",
            "required_skills": "Rust, SQL, Linux",
            "company_id": company
        }),
    )
    .await;

    post_job(
        &app,
        &token,
        json!({
            "title": "Data Scientist",
            "description": "Models and notebooks",
            "employment_type": "full_time",
            "required_skills": "Python, Pandas",
            "company_id": company
        }),
    )
    .await;

    // comma-separated skills; matching any one of them is enough
    let request = Request::builder()
        .method("GET")
        .uri("/api/jobs?skills=rust,go")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], rust_job.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_close_job_removes_it_from_listing(pool: PgPool) {
    let employer =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let company = create_company(&pool, employer.id, "Acme").await;
    let job = create_job(&pool, company, "Backend Engineer").await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &employer).await;

    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/api/jobs/{job}"),
            &token,
            &json!({ "status": "closed" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "closed");

    let request = Request::builder()
        .method("GET")
        .uri("/api/jobs")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_job_by_non_owner_forbidden(pool: PgPool) {
    let owner =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let other =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let company = create_company(&pool, owner.id, "Acme").await;
    let job = create_job(&pool, company, "Backend Engineer").await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &other).await;

    let response = app
        .oneshot(put_json(
            &format!("/api/jobs/{job}"),
            &token,
            &json!({ "title": "Hijacked" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Not authorized to modify this job");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_job(pool: PgPool) {
    let employer =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let company = create_company(&pool, employer.id, "Acme").await;
    let job = create_job(&pool, company, "Backend Engineer").await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &employer).await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/jobs/{job}"))
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/jobs/{job}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_apply_to_job(pool: PgPool) {
    let employer =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let seeker = create_user(&pool, &generate_unique_email(), "Testpass123", "seeker", true).await;
    let company = create_company(&pool, employer.id, "Acme").await;
    let job = create_job(&pool, company, "Backend Engineer").await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &seeker).await;

    let response = app
        .oneshot(post_json(
            &format!("/api/applications/jobs/{job}/apply"),
            &token,
            &json!({
                "resume_url": "https://example.com/resume.pdf",
                "cover_letter": "I would love to work on this."
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["job_id"], job.to_string());
    assert_eq!(body["user_id"], seeker.id.to_string());
    assert_eq!(body["status"], "applied");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_apply_requires_seeker(pool: PgPool) {
    let employer =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let company = create_company(&pool, employer.id, "Acme").await;
    let job = create_job(&pool, company, "Backend Engineer").await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &employer).await;

    let response = app
        .oneshot(post_json(
            &format!("/api/applications/jobs/{job}/apply"),
            &token,
            &json!({ "resume_url": "https://example.com/resume.pdf" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_apply_twice_rejected(pool: PgPool) {
    let employer =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let seeker = create_user(&pool, &generate_unique_email(), "Testpass123", "seeker", true).await;
    let company = create_company(&pool, employer.id, "Acme").await;
    let job = create_job(&pool, company, "Backend Engineer").await;
    create_application(&pool, job, seeker.id).await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &seeker).await;

    let response = app
        .oneshot(post_json(
            &format!("/api/applications/jobs/{job}/apply"),
            &token,
            &json!({ "resume_url": "https://example.com/resume.pdf" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(
        body["error"]["message"],
        "You have already applied to this job"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_apply_to_closed_job_rejected(pool: PgPool) {
    let employer =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let seeker = create_user(&pool, &generate_unique_email(), "Testpass123", "seeker", true).await;
    let company = create_company(&pool, employer.id, "Acme").await;
    let job = create_job(&pool, company, "Backend Engineer").await;
    close_job(&pool, job).await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &seeker).await;

    let response = app
        .oneshot(post_json(
            &format!("/api/applications/jobs/{job}/apply"),
            &token,
            &json!({ "resume_url": "https://example.com/resume.pdf" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(
        body["error"]["message"],
        "This job is no longer accepting applications"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_my_applications(pool: PgPool) {
    let employer =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let seeker = create_user(&pool, &generate_unique_email(), "Testpass123", "seeker", true).await;
    let other = create_user(&pool, &generate_unique_email(), "Testpass123", "seeker", true).await;
    let company = create_company(&pool, employer.id, "Acme").await;
    let job = create_job(&pool, company, "Backend Engineer").await;
    create_application(&pool, job, seeker.id).await;
    create_application(&pool, job, other.id).await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &seeker).await;

    let response = app
        .oneshot(get("/api/applications/my-applications", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["job_title"], "Backend Engineer");
    assert_eq!(list[0]["company_name"], "Acme");
    assert_eq!(list[0]["applicant_id"], seeker.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_employer_applications_across_companies(pool: PgPool) {
    let employer =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let rival =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let seeker = create_user(&pool, &generate_unique_email(), "Testpass123", "seeker", true).await;

    let first_company = create_company(&pool, employer.id, "Acme").await;
    let second_company = create_company(&pool, employer.id, "Globex").await;
    let rival_company = create_company(&pool, rival.id, "Initech").await;

    let first_job = create_job(&pool, first_company, "Backend Engineer").await;
    let second_job = create_job(&pool, second_company, "Frontend Engineer").await;
    let rival_job = create_job(&pool, rival_company, "Data Engineer").await;

    create_application(&pool, first_job, seeker.id).await;
    create_application(&pool, second_job, seeker.id).await;
    create_application(&pool, rival_job, seeker.id).await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &employer).await;

    // all applications across every company the caller owns
    let response = app
        .clone()
        .oneshot(get("/api/applications/employer/applications", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["job_title"].as_str().unwrap())
        .collect();
    assert_eq!(titles.len(), 2);
    assert!(titles.contains(&"Backend Engineer"));
    assert!(titles.contains(&"Frontend Engineer"));

    // narrowed to a single job
    let response = app
        .oneshot(get(
            &format!("/api/applications/employer/applications?job_id={first_job}"),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["job_title"], "Backend Engineer");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_employer_applications_rejects_seekers(pool: PgPool) {
    let seeker = create_user(&pool, &generate_unique_email(), "Testpass123", "seeker", true).await;

    let app = setup_test_app(pool.clone());
    let token = access_token(&app, &seeker).await;

    let response = app
        .oneshot(get("/api/applications/employer/applications", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Employer or admin access required");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_application_details_access(pool: PgPool) {
    let employer =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let seeker = create_user(&pool, &generate_unique_email(), "Testpass123", "seeker", true).await;
    let stranger =
        create_user(&pool, &generate_unique_email(), "Testpass123", "seeker", true).await;
    let admin = create_user(&pool, &generate_unique_email(), "Testpass123", "admin", true).await;
    let company = create_company(&pool, employer.id, "Acme").await;
    let job = create_job(&pool, company, "Backend Engineer").await;
    let application = create_application(&pool, job, seeker.id).await;

    let app = setup_test_app(pool.clone());
    let uri = format!("/api/applications/{application}");

    // the applicant, the company owner and an admin can all see it
    for user in [&seeker, &employer, &admin] {
        let token = access_token(&app, user).await;
        let response = app.clone().oneshot(get(&uri, &token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let token = access_token(&app, &stranger).await;
    let response = app.oneshot(get(&uri, &token)).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(
        body["error"]["message"],
        "Not authorized to view this application"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_application_status(pool: PgPool) {
    let employer =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let rival =
        create_user(&pool, &generate_unique_email(), "Testpass123", "employer", true).await;
    let seeker = create_user(&pool, &generate_unique_email(), "Testpass123", "seeker", true).await;
    let company = create_company(&pool, employer.id, "Acme").await;
    let job = create_job(&pool, company, "Backend Engineer").await;
    let application = create_application(&pool, job, seeker.id).await;

    let app = setup_test_app(pool.clone());
    let uri = format!("/api/applications/{application}/status");

    // an employer who does not own the job cannot move it
    let token = access_token(&app, &rival).await;
    let response = app
        .clone()
        .oneshot(put_json(&uri, &token, &json!({ "status": "reviewed" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(
        body["error"]["message"],
        "Not authorized to update this application"
    );

    let token = access_token(&app, &employer).await;
    let response = app
        .oneshot(put_json(&uri, &token, &json!({ "status": "reviewed" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "reviewed");
}
