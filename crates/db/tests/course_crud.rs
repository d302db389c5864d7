//! Integration tests for the course and student repositories.
//!
//! Exercises the repository layer against a real database:
//! - Course create / find / list / update / delete
//! - Exact-match list filters on id and name
//! - Enrollment management (set on create/update, add, remove, cascade)
//! - Student lookups and missing-id detection

use courses_db::models::course::{CourseFilter, CreateCourse, UpdateCourse};
use courses_db::models::student::{CreateStudent, UpdateStudent};
use courses_db::repositories::{CourseRepo, StudentRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_course(name: &str) -> CreateCourse {
    CreateCourse {
        name: name.to_string(),
        students: Vec::new(),
    }
}

fn new_student(name: &str) -> CreateStudent {
    CreateStudent {
        name: name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find_course(pool: PgPool) {
    let course = CourseRepo::create(&pool, &new_course("Rust 101")).await.unwrap();
    assert_eq!(course.name, "Rust 101");
    assert!(course.students.is_empty());

    let found = CourseRepo::find_by_id(&pool, course.id)
        .await
        .unwrap()
        .expect("course should exist");
    assert_eq!(found.id, course.id);
    assert_eq!(found.name, "Rust 101");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_missing_course_returns_none(pool: PgPool) {
    let found = CourseRepo::find_by_id(&pool, 999_999).await.unwrap();
    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_returns_creation_order(pool: PgPool) {
    let names = ["a", "b", "c", "d"];
    for name in names {
        CourseRepo::create(&pool, &new_course(name)).await.unwrap();
    }

    let courses = CourseRepo::list(&pool, &CourseFilter::default()).await.unwrap();
    let listed: Vec<&str> = courses.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(listed, names);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_id_and_name(pool: PgPool) {
    let first = CourseRepo::create(&pool, &new_course("algebra")).await.unwrap();
    let second = CourseRepo::create(&pool, &new_course("algebra")).await.unwrap();
    CourseRepo::create(&pool, &new_course("geometry")).await.unwrap();

    let by_name = CourseRepo::list(
        &pool,
        &CourseFilter {
            ids: Vec::new(),
            name: Some("algebra".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(by_name.len(), 2);

    let by_id = CourseRepo::list(
        &pool,
        &CourseFilter {
            ids: vec![second.id],
            name: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(by_id.len(), 1);
    assert_eq!(by_id[0].id, second.id);

    let both = CourseRepo::list(
        &pool,
        &CourseFilter {
            ids: vec![first.id],
            name: Some("algebra".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].id, first.id);

    let mismatched = CourseRepo::list(
        &pool,
        &CourseFilter {
            ids: vec![first.id],
            name: Some("geometry".into()),
        },
    )
    .await
    .unwrap();
    assert!(mismatched.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_with_two_different_ids_matches_nothing(pool: PgPool) {
    let a = CourseRepo::create(&pool, &new_course("a")).await.unwrap();
    let b = CourseRepo::create(&pool, &new_course("b")).await.unwrap();

    let courses = CourseRepo::list(
        &pool,
        &CourseFilter {
            ids: vec![a.id, b.id],
            name: None,
        },
    )
    .await
    .unwrap();
    assert!(courses.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_only_changes_supplied_fields(pool: PgPool) {
    let student = StudentRepo::create(&pool, &new_student("Ada")).await.unwrap();
    let course = CourseRepo::create(
        &pool,
        &CreateCourse {
            name: "Original".into(),
            students: vec![student.id],
        },
    )
    .await
    .unwrap();

    let renamed = CourseRepo::update(
        &pool,
        course.id,
        &UpdateCourse {
            name: Some("Renamed".into()),
            students: None,
        },
    )
    .await
    .unwrap()
    .expect("course should exist");
    assert_eq!(renamed.name, "Renamed");
    assert_eq!(renamed.students, vec![student.id]);
    assert!(renamed.updated_at >= course.updated_at);

    let untouched = CourseRepo::update(&pool, course.id, &UpdateCourse::default())
        .await
        .unwrap()
        .expect("course should exist");
    assert_eq!(untouched.name, "Renamed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_course_returns_none(pool: PgPool) {
    let result = CourseRepo::update(
        &pool,
        999_999,
        &UpdateCourse {
            name: Some("x".into()),
            students: None,
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_course_decrements_count(pool: PgPool) {
    let mut ids = Vec::new();
    for i in 0..5 {
        let course = CourseRepo::create(&pool, &new_course(&format!("course-{i}")))
            .await
            .unwrap();
        ids.push(course.id);
    }
    assert_eq!(CourseRepo::count(&pool).await.unwrap(), 5);

    assert!(CourseRepo::delete(&pool, ids[0]).await.unwrap());
    assert_eq!(CourseRepo::count(&pool).await.unwrap(), 4);
    assert!(CourseRepo::find_by_id(&pool, ids[0]).await.unwrap().is_none());

    // Second delete is a miss.
    assert!(!CourseRepo::delete(&pool, ids[0]).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_name_violates_check_constraint(pool: PgPool) {
    let result = CourseRepo::create(&pool, &new_course("   ")).await;
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Enrollments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_students_sorts_ids(pool: PgPool) {
    let s1 = StudentRepo::create(&pool, &new_student("one")).await.unwrap();
    let s2 = StudentRepo::create(&pool, &new_student("two")).await.unwrap();

    let course = CourseRepo::create(
        &pool,
        &CreateCourse {
            name: "Enrolled".into(),
            students: vec![s2.id, s1.id],
        },
    )
    .await
    .unwrap();
    assert_eq!(course.students, vec![s1.id, s2.id]);

    let students = CourseRepo::list_students(&pool, course.id).await.unwrap();
    let names: Vec<&str> = students.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["one", "two"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_enrollments(pool: PgPool) {
    let s1 = StudentRepo::create(&pool, &new_student("one")).await.unwrap();
    let s2 = StudentRepo::create(&pool, &new_student("two")).await.unwrap();
    let course = CourseRepo::create(
        &pool,
        &CreateCourse {
            name: "Swap".into(),
            students: vec![s1.id],
        },
    )
    .await
    .unwrap();

    let updated = CourseRepo::update(
        &pool,
        course.id,
        &UpdateCourse {
            name: None,
            students: Some(vec![s2.id]),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.students, vec![s2.id]);

    let cleared = CourseRepo::update(
        &pool,
        course.id,
        &UpdateCourse {
            name: None,
            students: Some(Vec::new()),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(cleared.students.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_unknown_student_rolls_back(pool: PgPool) {
    let result = CourseRepo::create(
        &pool,
        &CreateCourse {
            name: "Orphan".into(),
            students: vec![424_242],
        },
    )
    .await;
    assert!(result.is_err(), "foreign key violation expected");
    assert_eq!(CourseRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_add_and_remove_student(pool: PgPool) {
    let student = StudentRepo::create(&pool, &new_student("Grace")).await.unwrap();
    let course = CourseRepo::create(&pool, &new_course("COBOL")).await.unwrap();

    assert!(CourseRepo::add_student(&pool, course.id, student.id).await.unwrap());
    // Idempotent.
    assert!(!CourseRepo::add_student(&pool, course.id, student.id).await.unwrap());

    let found = CourseRepo::find_by_id(&pool, course.id).await.unwrap().unwrap();
    assert_eq!(found.students, vec![student.id]);

    assert!(CourseRepo::remove_student(&pool, course.id, student.id).await.unwrap());
    assert!(!CourseRepo::remove_student(&pool, course.id, student.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_course_keeps_students(pool: PgPool) {
    let student = StudentRepo::create(&pool, &new_student("Linus")).await.unwrap();
    let course = CourseRepo::create(
        &pool,
        &CreateCourse {
            name: "Kernels".into(),
            students: vec![student.id],
        },
    )
    .await
    .unwrap();

    assert!(CourseRepo::delete(&pool, course.id).await.unwrap());
    assert!(StudentRepo::find_by_id(&pool, student.id).await.unwrap().is_some());

    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM course_students")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(links, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_student_drops_enrollment(pool: PgPool) {
    let student = StudentRepo::create(&pool, &new_student("Barbara")).await.unwrap();
    let course = CourseRepo::create(
        &pool,
        &CreateCourse {
            name: "Abstraction".into(),
            students: vec![student.id],
        },
    )
    .await
    .unwrap();

    assert!(StudentRepo::delete(&pool, student.id).await.unwrap());
    let found = CourseRepo::find_by_id(&pool, course.id).await.unwrap().unwrap();
    assert!(found.students.is_empty());
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_student_list_and_update(pool: PgPool) {
    let ada = StudentRepo::create(&pool, &new_student("Ada")).await.unwrap();
    StudentRepo::create(&pool, &new_student("Alan")).await.unwrap();

    assert_eq!(StudentRepo::list(&pool, None).await.unwrap().len(), 2);
    let only_ada = StudentRepo::list(&pool, Some("Ada")).await.unwrap();
    assert_eq!(only_ada.len(), 1);
    assert_eq!(only_ada[0].id, ada.id);

    let renamed = StudentRepo::update(
        &pool,
        ada.id,
        &UpdateStudent {
            name: Some("Augusta".into()),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.name, "Augusta");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_missing_students(pool: PgPool) {
    let s = StudentRepo::create(&pool, &new_student("present")).await.unwrap();

    let missing = StudentRepo::find_missing(&pool, &[s.id, 900_002, 900_001, 900_001])
        .await
        .unwrap();
    assert_eq!(missing, vec![900_001, 900_002]);

    assert!(StudentRepo::find_missing(&pool, &[]).await.unwrap().is_empty());
}
