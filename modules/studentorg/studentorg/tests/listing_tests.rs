#![allow(clippy::unwrap_used, clippy::expect_used, clippy::use_debug)]

//! Search, sort and pagination against the real store.

mod common;

use studentorg::domain::query::{ListQuery, MemberSort, ProgramSort};
use studentorg_sdk::{NewCollege, NewOrganization, NewStudent};
use uuid::Uuid;

use common::{date, setup};

fn query(q: Option<&str>, page: Option<&str>) -> ListQuery {
    ListQuery::new(q, page)
}

#[tokio::test]
async fn twelve_records_make_pages_of_five_five_two() {
    let fx = setup().await;
    for i in 1..=12 {
        fx.college(&format!("College {i:02}")).await;
    }

    let sizes: Vec<usize> = {
        let mut sizes = Vec::new();
        for page in ["1", "2", "3"] {
            let p = fx.svc.list_colleges(&query(None, Some(page))).await.unwrap();
            assert_eq!(p.page_info.num_pages, 3);
            assert_eq!(p.page_info.total_items, 12);
            sizes.push(p.items.len());
        }
        sizes
    };
    assert_eq!(sizes, [5, 5, 2]);

    let third = fx.svc.list_colleges(&query(None, Some("3"))).await.unwrap();
    let past_end = fx.svc.list_colleges(&query(None, Some("4"))).await.unwrap();
    let last = fx.svc.list_colleges(&query(None, Some("last"))).await.unwrap();
    assert_eq!(past_end.page_info.number, 3);
    assert_eq!(past_end.items, third.items);
    assert_eq!(last.items, third.items);
    let huge = fx
        .svc
        .list_colleges(&query(None, Some("99999999999999999999999")))
        .await
        .unwrap();
    assert_eq!(huge.page_info.number, 3);
    assert_eq!(huge.items, third.items);

    let first = fx.svc.list_colleges(&query(None, None)).await.unwrap();
    for junk in ["abc", "0", "-2", ""] {
        let p = fx.svc.list_colleges(&query(None, Some(junk))).await.unwrap();
        assert_eq!(p.page_info.number, 1, "page={junk:?}");
        assert_eq!(p.items, first.items);
    }
    assert_eq!(first.items[0].college_name, "College 01");
}

#[tokio::test]
async fn empty_listing_has_one_empty_page() {
    let fx = setup().await;

    let page = fx
        .svc
        .list_students(&query(None, Some("7")))
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.page_info.number, 1);
    assert_eq!(page.page_info.num_pages, 1);
    assert_eq!(page.page_info.total_items, 0);
}

#[tokio::test]
async fn blank_search_is_no_filter() {
    let fx = setup().await;
    fx.college("College of Engineering").await;
    fx.college("College of Arts").await;

    let all = fx.svc.list_colleges(&query(None, None)).await.unwrap();
    for blank in ["", "   "] {
        let p = fx.svc.list_colleges(&query(Some(blank), None)).await.unwrap();
        assert_eq!(p.items, all.items);
    }
    assert_eq!(all.items.len(), 2);
}

#[tokio::test]
async fn search_is_case_insensitive_substring() {
    let fx = setup().await;
    fx.college("College of Engineering").await;
    fx.college("College of Arts").await;

    for term in ["ENGIN", "engin", "Engineering"] {
        let p = fx.svc.list_colleges(&query(Some(term), None)).await.unwrap();
        let names: Vec<_> = p.items.iter().map(|c| c.college_name.as_str()).collect();
        assert_eq!(names, ["College of Engineering"], "term={term}");
    }
}

#[tokio::test]
async fn search_folds_non_ascii_capitals() {
    let fx = setup().await;
    let nandu = fx.college("ÑANDÚ College").await;
    fx.college("College of Arts").await;

    let hits = |term: &'static str| {
        let svc = fx.svc.clone();
        async move {
            svc.list_colleges(&query(Some(term), None))
                .await
                .unwrap()
                .items
                .into_iter()
                .map(|c| c.id)
                .collect::<Vec<Uuid>>()
        }
    };

    for term in ["ÑANDÚ", "ñandú", "Ñandú", "ÑANDÚ College"] {
        assert_eq!(hits(term).await, [nandu.id], "term={term}");
    }

    fx.svc
        .update_college(
            nandu.id,
            NewCollege {
                college_name: "Colegio de Señoras".to_owned(),
            },
        )
        .await
        .unwrap();
    assert!(hits("ñandú").await.is_empty());
    assert_eq!(hits("SEÑORAS").await, [nandu.id]);
}

#[tokio::test]
async fn search_wildcards_match_literally() {
    let fx = setup().await;
    fx.college("A_B Institute").await;
    fx.college("AxB Institute").await;
    fx.college("100% Academy").await;

    let underscore = fx.svc.list_colleges(&query(Some("a_b"), None)).await.unwrap();
    assert_eq!(underscore.items.len(), 1);
    assert_eq!(underscore.items[0].college_name, "A_B Institute");

    let percent = fx.svc.list_colleges(&query(Some("%"), None)).await.unwrap();
    assert_eq!(percent.items.len(), 1);
    assert_eq!(percent.items[0].college_name, "100% Academy");
}

#[tokio::test]
async fn program_search_includes_college_name() {
    let fx = setup().await;
    let eng = fx.college("College of Engineering").await;
    let arts = fx.college("College of Arts").await;
    fx.program("BS Civil Engineering", &eng).await;
    fx.program("BA Music", &arts).await;

    let p = fx
        .svc
        .list_programs(&query(Some("arts"), None), ProgramSort::default())
        .await
        .unwrap();

    assert_eq!(p.items.len(), 1);
    assert_eq!(p.items[0].prog_name, "BA Music");
    assert_eq!(p.items[0].college_name, "College of Arts");
}

#[tokio::test]
async fn program_sort_falls_back_to_name() {
    let fx = setup().await;
    let alpha = fx.college("Alpha College").await;
    let zeta = fx.college("Zeta College").await;
    fx.program("Zoology", &alpha).await;
    fx.program("Accounting", &zeta).await;

    let names = |sort_by: Option<&'static str>| {
        let svc = fx.svc.clone();
        async move {
            svc.list_programs(&query(None, None), ProgramSort::resolve(sort_by))
                .await
                .unwrap()
                .items
                .into_iter()
                .map(|p| p.prog_name)
                .collect::<Vec<_>>()
        }
    };

    assert_eq!(names(None).await, ["Accounting", "Zoology"]);
    assert_eq!(names(Some("prog_name")).await, ["Accounting", "Zoology"]);
    assert_eq!(
        names(Some("college__college_name")).await,
        ["Zoology", "Accounting"]
    );
    assert_eq!(names(Some("bogus")).await, names(None).await);
}

#[tokio::test]
async fn members_sort_by_lastname_then_firstname() {
    let fx = setup().await;
    let college = fx.college("College of Science").await;
    let program = fx.program("BS Biology", &college).await;
    let org = fx.organization("Chess Club", &college).await;

    let ben = fx.student("2024-0001", "Cruz", "Ben", &program).await;
    let carl = fx.student("2024-0002", "Abad", "Carl", &program).await;
    let ana = fx.student("2024-0003", "Cruz", "Ana", &program).await;
    fx.member(&ben, &org, date(2024, 1, 10)).await;
    fx.member(&carl, &org, date(2024, 2, 10)).await;
    fx.member(&ana, &org, date(2024, 3, 10)).await;

    let order = |sort_by: Option<&'static str>, sort_order: Option<&'static str>| {
        let svc = fx.svc.clone();
        async move {
            svc.list_members(
                &query(None, None),
                MemberSort::resolve(sort_by, sort_order),
            )
            .await
            .unwrap()
            .items
            .into_iter()
            .map(|m| format!("{} {}", m.student_firstname, m.student_lastname))
            .collect::<Vec<_>>()
        }
    };

    assert_eq!(order(None, None).await, ["Carl Abad", "Ana Cruz", "Ben Cruz"]);
    assert_eq!(
        order(Some("student__lastname"), Some("desc")).await,
        ["Ben Cruz", "Ana Cruz", "Carl Abad"]
    );
    assert_eq!(
        order(Some("date_joined"), Some("desc")).await,
        ["Ana Cruz", "Carl Abad", "Ben Cruz"]
    );
    assert_eq!(
        order(Some("student__firstname"), Some("DESC")).await,
        ["Ana Cruz", "Ben Cruz", "Carl Abad"],
        "only the literal `desc` reverses"
    );
    assert_eq!(order(Some("nope"), None).await, order(None, None).await);
}

#[tokio::test]
async fn member_search_matches_unpadded_date_parts() {
    let fx = setup().await;
    let college = fx.college("College of Science").await;
    let program = fx.program("BS Physics", &college).await;
    let chess = fx.organization("Chess Club", &college).await;
    let debate = fx.organization("Debate Society", &college).await;

    let ana = fx.student("2024-0010", "Reyes", "Ana", &program).await;
    let ben = fx.student("2024-0011", "Santos", "Ben", &program).await;
    let in_march = fx.member(&ana, &chess, date(2021, 3, 7)).await;
    let in_november = fx.member(&ben, &debate, date(2019, 11, 15)).await;

    let hits = |term: &'static str| {
        let svc = fx.svc.clone();
        async move {
            svc.list_members(&query(Some(term), None), MemberSort::default())
                .await
                .unwrap()
                .items
                .into_iter()
                .map(|m| m.id)
                .collect::<Vec<Uuid>>()
        }
    };

    assert_eq!(hits("2021").await, [in_march.id]);
    assert_eq!(hits("11").await, [in_november.id]);
    assert_eq!(hits("3").await, [in_march.id]);
    assert!(hits("03").await.is_empty(), "months are not zero-padded");
    assert_eq!(hits("debate").await, [in_november.id]);
    assert_eq!(hits("REYES").await, [in_march.id]);
}

#[tokio::test]
async fn student_search_covers_every_documented_field() {
    let fx = setup().await;
    let college = fx.college("College of Science").await;
    let biology = fx.program("BS Biology", &college).await;
    let nursing = fx.program("BS Nursing", &college).await;

    let ana = fx
        .svc
        .create_student(NewStudent {
            student_id: "2023-0042".to_owned(),
            lastname: "Reyes".to_owned(),
            firstname: "Ana".to_owned(),
            middlename: Some("Ébano".to_owned()),
            program_id: biology.id,
        })
        .await
        .unwrap();
    let ben = fx.student("2024-0077", "Santos", "Ben", &nursing).await;

    let hits = |term: &'static str| {
        let svc = fx.svc.clone();
        async move {
            svc.list_students(&query(Some(term), None))
                .await
                .unwrap()
                .items
                .into_iter()
                .map(|s| s.id)
                .collect::<Vec<Uuid>>()
        }
    };

    assert_eq!(hits("reye").await, [ana.id], "lastname");
    assert_eq!(hits("BEN").await, [ben.id], "firstname");
    assert_eq!(hits("ébano").await, [ana.id], "middlename");
    assert_eq!(hits("3-0042").await, [ana.id], "student_id");
    assert_eq!(hits("nursing").await, [ben.id], "program name");
    assert_eq!(hits("BS ").await, [ana.id, ben.id], "ordered by lastname");
    assert!(hits("engineering").await.is_empty());
}

#[tokio::test]
async fn organization_search_and_default_order() {
    let fx = setup().await;
    let science = fx.college("College of Science").await;
    let arts = fx.college("College of Arts").await;

    let create = |name: &'static str, description: &'static str, college_id: Uuid| {
        let svc = fx.svc.clone();
        async move {
            svc.create_organization(NewOrganization {
                name: name.to_owned(),
                description: description.to_owned(),
                college_id,
            })
            .await
            .unwrap()
        }
    };
    let robotics = create("Robotics Guild", "Builds competition robots", science.id).await;
    let chess = create("Chess Club", "Weekly tournaments", science.id).await;
    let choir = create("Choir", "Sacred and secular music", arts.id).await;

    let hits = |term: Option<&'static str>| {
        let svc = fx.svc.clone();
        async move {
            svc.list_organizations(&query(term, None))
                .await
                .unwrap()
                .items
                .into_iter()
                .map(|o| o.id)
                .collect::<Vec<Uuid>>()
        }
    };

    assert_eq!(
        hits(None).await,
        [choir.id, chess.id, robotics.id],
        "college name, then organization name"
    );
    assert_eq!(hits(Some("guild")).await, [robotics.id], "name");
    assert_eq!(hits(Some("TOURNAMENT")).await, [chess.id], "description");
    assert_eq!(hits(Some("science")).await, [chess.id, robotics.id], "college name");
    assert!(hits(Some("debate")).await.is_empty());
}
