//! End-to-end traversal scenarios against the public API.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use pretty_assertions::assert_eq;
use spelunk_core::annotation::Directive;
use spelunk_core::{Dynamic, ReflectError, SpelunkError, Spelunker, Value, handlers, zeroer};
use spelunk_reflect::Record;

type Log = Rc<RefCell<Vec<String>>>;

#[derive(Record, Debug)]
struct Pet {
    #[tags(rename = "Name", spelunk = "capitalize")]
    name: String,
}

#[derive(Record, Debug)]
struct Person {
    #[tags(rename = "Name", spelunk = "trim,capitalize")]
    name: String,
    #[tags(rename = "Age", spelunk2 = "min:18")]
    age: i64,
    #[tags(rename = "Pets")]
    pets: Vec<Pet>,
    #[tags(rename = "Secrets", spelunk = "secret")]
    secrets: HashMap<String, Dynamic>,
}

#[test]
fn test_person_example() {
    let mut person = Person {
        name: "   gohpher  ".to_string(),
        age: 3,
        pets: vec![Pet {
            name: "geomyidae".to_string(),
        }],
        secrets: HashMap::from([("foo".to_string(), Dynamic::new("bar".to_string()))]),
    };

    let log = Log::default();
    let capitalized = Rc::clone(&log);
    let mut s1 = Spelunker::new();
    s1.set_handler("trim", handlers::trim)
        .set_handler("capitalize", move |name, path, directive, value| {
            capitalized
                .borrow_mut()
                .push(format!("Capitalizing {} ({})", name, path));
            handlers::capitalize(name, path, directive, value)
        })
        .set_handler("secret", zeroer);

    let mut s2 = Spelunker::new();
    s2.set_tag("spelunk2").set_handler("min", handlers::min);

    s1.spelunk(&mut person).unwrap();
    s2.spelunk(&mut person).unwrap();

    insta::assert_snapshot!(log.borrow().join("\n"), @r"
    Capitalizing Name (Name)
    Capitalizing Name (Pets[0].Name)
    ");
    insta::assert_debug_snapshot!(person, @r#"
    Person {
        name: "Gohpher",
        age: 18,
        pets: [
            Pet {
                name: "Geomyidae",
            },
        ],
        secrets: {},
    }
    "#);
}

#[test]
fn test_zeroer_example() {
    #[derive(Record, Debug)]
    struct Example {
        #[tags(spelunk = "zero")]
        string: String,
        #[tags(spelunk = "zero")]
        int: i32,
        #[tags(spelunk = "zero")]
        float: f64,
        #[tags(spelunk = "zero")]
        map: HashMap<String, String>,
        #[tags(spelunk = "zero")]
        slice: Vec<String>,
        #[tags(spelunk = "zero")]
        array: [String; 2],
        #[tags(spelunk = "zero")]
        optional: Option<u8>,
    }

    let mut example = Example {
        string: "string".to_string(),
        int: 1,
        float: 1.2,
        map: HashMap::from([("key".to_string(), "value".to_string())]),
        slice: vec!["foo".to_string(), "bar".to_string()],
        array: ["baz".to_string(), "qux".to_string()],
        optional: Some(7),
    };

    let mut spelunker = Spelunker::new();
    spelunker.set_handler("zero", zeroer);
    spelunker.spelunk(&mut example).unwrap();

    insta::assert_debug_snapshot!(example, @r#"
    Example {
        string: "",
        int: 0,
        float: 0.0,
        map: {},
        slice: [],
        array: [
            "",
            "",
        ],
        optional: Some(
            0,
        ),
    }
    "#);
}

#[test]
fn test_every_field_handler_runs_once_per_field_in_order() {
    #[derive(Record, Default)]
    struct Flat {
        first: String,
        second: u32,
        third: bool,
        fourth: Option<String>,
    }

    let log = Log::default();
    let seen = Rc::clone(&log);
    let mut spelunker = Spelunker::new();
    spelunker.set_every_field_handler(move |name, _, _, _| {
        seen.borrow_mut().push(name.to_string());
        Ok(())
    });
    spelunker.spelunk(&mut Flat::default()).unwrap();

    assert_eq!(*log.borrow(), vec!["first", "second", "third", "fourth"]);
}

#[test]
fn test_directives_are_dispatched_in_order_with_arguments() {
    #[derive(Record, Default)]
    struct Tagged {
        #[tags(spelunk = "a,b:3,c")]
        value: u8,
    }

    let log = Log::default();
    let mut spelunker = Spelunker::new();
    for key in ["a", "b", "c"] {
        let seen = Rc::clone(&log);
        spelunker.set_handler(key, move |_, _, directive, _| {
            let directive = Directive::new(directive);
            let entry = match directive.argument() {
                Some(_) => format!("{}={}", directive.key(), directive.parse_argument::<u32>()?),
                None => directive.key().to_string(),
            };
            seen.borrow_mut().push(entry);
            Ok(())
        });
    }
    spelunker.spelunk(&mut Tagged::default()).unwrap();

    assert_eq!(*log.borrow(), vec!["a", "b=3", "c"]);
}

#[test]
fn test_null_and_empty_values_are_skipped() {
    #[derive(Record, Default)]
    struct Inner {
        #[tags(spelunk = "mark")]
        text: String,
    }

    #[derive(Record, Default)]
    struct Outer {
        holder: Dynamic,
        nested: Vec<Dynamic>,
        optional: Option<Inner>,
    }

    let log = Log::default();
    let seen = Rc::clone(&log);
    let mut spelunker = Spelunker::new();
    spelunker.set_handler("mark", move |_, path, _, _| {
        seen.borrow_mut().push(path.to_string());
        Ok(())
    });

    let mut outer = Outer {
        nested: vec![Dynamic::empty(), Dynamic::new(Inner::default())],
        ..Outer::default()
    };
    spelunker.spelunk(&mut outer).unwrap();
    spelunker.spelunk(&mut None::<Outer>).unwrap();
    spelunker.spelunk(&Dynamic::empty()).unwrap();

    assert_eq!(*log.borrow(), vec!["nested[1].text"]);
}

#[test]
fn test_map_paths_compare_as_a_set() {
    #[derive(Record)]
    struct Owner {
        #[tags(rename = "Name")]
        name: String,
    }

    #[derive(Record)]
    struct Registry {
        #[tags(rename = "Owners")]
        owners: HashMap<String, Owner>,
    }

    let registry = Registry {
        owners: HashMap::from([
            ("ada".to_string(), Owner { name: "Ada".into() }),
            ("grace".to_string(), Owner { name: "Grace".into() }),
        ]),
    };

    let paths = Rc::new(RefCell::new(BTreeSet::new()));
    let seen = Rc::clone(&paths);
    let mut spelunker = Spelunker::new();
    spelunker.set_every_field_handler(move |_, path, _, _| {
        seen.borrow_mut().insert(path.to_string());
        Ok(())
    });
    spelunker.spelunk(&registry).unwrap();

    insta::assert_debug_snapshot!(paths.borrow(), @r#"
    {
        "Owners",
        "Owners[\"ada\"].Name",
        "Owners[\"grace\"].Name",
    }
    "#);
}

#[derive(Debug, PartialEq)]
enum AuditError {
    Reflect(ReflectError),
    Rejected(String),
}

impl From<ReflectError> for AuditError {
    fn from(err: ReflectError) -> Self {
        AuditError::Reflect(err)
    }
}

#[test]
fn test_nested_error_propagates_unchanged() {
    #[derive(Record)]
    struct Pet {
        #[tags(spelunk = "check")]
        name: String,
    }

    #[derive(Record)]
    struct Owner {
        pets: Vec<Pet>,
        #[tags(spelunk = "mark")]
        label: String,
    }

    #[derive(Record)]
    struct Root {
        owners: HashMap<String, Rc<RefCell<Owner>>>,
        #[tags(spelunk = "mark")]
        after: String,
    }

    let mut root = Root {
        owners: HashMap::from([(
            "ada".to_string(),
            Rc::new(RefCell::new(Owner {
                pets: vec![
                    Pet { name: "ok".into() },
                    Pet { name: "bad".into() },
                    Pet { name: "unseen".into() },
                ],
                label: String::new(),
            })),
        )]),
        after: String::new(),
    };

    let log = Log::default();
    let checked = Rc::clone(&log);
    let marked = Rc::clone(&log);
    let mut spelunker: Spelunker<AuditError> = Spelunker::default();
    spelunker
        .set_handler("check", move |_, path, _, value| {
            checked.borrow_mut().push(format!("check {}", path));
            if value.downcast_ref::<String>().map(String::as_str) == Some("bad") {
                return Err(AuditError::Rejected(path.to_string()));
            }
            Ok(())
        })
        .set_handler("mark", move |_, path, _, _| {
            marked.borrow_mut().push(format!("mark {}", path));
            Ok(())
        });

    let err = spelunker.spelunk(&mut root).unwrap_err();
    assert_eq!(
        err,
        AuditError::Rejected(r#"owners["ada"].pets[1].name"#.to_string())
    );
    insta::assert_snapshot!(log.borrow().join("\n"), @r#"
    check owners["ada"].pets[0].name
    check owners["ada"].pets[1].name
    "#);
}

#[test]
fn test_mutations_before_an_error_are_kept() {
    #[derive(Record, Default)]
    struct Form {
        #[tags(spelunk = "trim")]
        first: String,
        #[tags(spelunk = "fail")]
        second: String,
        #[tags(spelunk = "trim")]
        third: String,
    }

    let mut form = Form {
        first: " a ".into(),
        second: " b ".into(),
        third: " c ".into(),
    };
    let mut spelunker = Spelunker::new();
    spelunker
        .set_handler("trim", handlers::trim)
        .set_handler("fail", |_, _, _, _| Err(SpelunkError::handler("rejected")));

    assert!(spelunker.spelunk(&mut form).is_err());
    assert_eq!(form.first, "a");
    assert_eq!(form.second, " b ");
    assert_eq!(form.third, " c ");
}

#[test]
fn test_zeroer_on_read_only_map_entry() {
    #[derive(Record, Debug, PartialEq, Clone)]
    struct Account {
        #[tags(spelunk = "zero")]
        token: String,
    }

    #[derive(Record)]
    struct Vault {
        accounts: HashMap<String, Account>,
    }

    let account = Account {
        token: "secret".into(),
    };
    let mut vault = Vault {
        accounts: HashMap::from([("main".to_string(), account.clone())]),
    };
    let mut spelunker = Spelunker::new();
    spelunker.set_handler("zero", zeroer);

    let err = spelunker.spelunk(&mut vault).unwrap_err();
    assert!(err.is_not_settable());
    assert_eq!(vault.accounts["main"], account);

    let mut direct = account.clone();
    let value = Value::from(&mut direct);
    zeroer::<SpelunkError>("token", "token", "zero", value).unwrap();
    assert_eq!(direct.token, "");
}
