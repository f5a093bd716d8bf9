use registry::{CommandRegistryReader, RegistryError};
use serde_json::{json, Value};
use zcashjson::*;

struct Case {
    name: &'static str,
    new_cmd: (&'static str, Vec<Value>),
    static_cmd: AnyCommand,
    marshalled: &'static str,
    unmarshalled: AnyCommand,
}

fn cases() -> Vec<Case> {
    vec![
        Case {
            name: "z_exportkey",
            new_cmd: ("z_exportkey", vec![json!("zs1abc")]),
            static_cmd: ZExportKeyCmd::new("zs1abc").into(),
            marshalled: r#"{"jsonrpc":"1.0","method":"z_exportkey","params":["zs1abc"],"id":1}"#,
            unmarshalled: ZExportKeyCmd::new("zs1abc").into(),
        },
        Case {
            name: "z_exportwallet",
            new_cmd: ("z_exportwallet", vec![json!("backup")]),
            static_cmd: ZExportWalletCmd::new("backup").into(),
            marshalled: r#"{"jsonrpc":"1.0","method":"z_exportwallet","params":["backup"],"id":1}"#,
            unmarshalled: ZExportWalletCmd::new("backup").into(),
        },
        Case {
            name: "z_getbalance",
            new_cmd: ("z_getbalance", vec![]),
            static_cmd: ZGetBalanceCmd::new(None, None).into(),
            marshalled: r#"{"jsonrpc":"1.0","method":"z_getbalance","params":[],"id":1}"#,
            unmarshalled: ZGetBalanceCmd::new(None, Some(1)).into(),
        },
        Case {
            name: "z_getbalance optional",
            new_cmd: ("z_getbalance", vec![json!("t1addr"), json!("6")]),
            static_cmd: ZGetBalanceCmd::new(Some("t1addr".to_string()), Some(6)).into(),
            marshalled: r#"{"jsonrpc":"1.0","method":"z_getbalance","params":["t1addr",6],"id":1}"#,
            unmarshalled: ZGetBalanceCmd::new(Some("t1addr".to_string()), Some(6)).into(),
        },
        Case {
            name: "z_getnewaddress",
            new_cmd: ("z_getnewaddress", vec![json!("sapling")]),
            static_cmd: ZGetNewAddressCmd::new(Some("sapling".to_string())).into(),
            marshalled: r#"{"jsonrpc":"1.0","method":"z_getnewaddress","params":["sapling"],"id":1}"#,
            unmarshalled: ZGetNewAddressCmd::new(Some("sapling".to_string())).into(),
        },
        Case {
            name: "z_getoperationresult",
            new_cmd: ("z_getoperationresult", vec![]),
            static_cmd: ZGetOperationResultCmd::new(None).into(),
            marshalled: r#"{"jsonrpc":"1.0","method":"z_getoperationresult","params":[],"id":1}"#,
            unmarshalled: ZGetOperationResultCmd::new(None).into(),
        },
        Case {
            name: "z_getoperationstatus optional",
            new_cmd: ("z_getoperationstatus", vec![json!(r#"["opid-1","opid-2"]"#)]),
            static_cmd: ZGetOperationStatusCmd::new(Some(vec![
                "opid-1".to_string(),
                "opid-2".to_string(),
            ]))
            .into(),
            marshalled: r#"{"jsonrpc":"1.0","method":"z_getoperationstatus","params":[["opid-1","opid-2"]],"id":1}"#,
            unmarshalled: ZGetOperationStatusCmd::new(Some(vec![
                "opid-1".to_string(),
                "opid-2".to_string(),
            ]))
            .into(),
        },
        Case {
            name: "z_gettotalbalance",
            new_cmd: ("z_gettotalbalance", vec![]),
            static_cmd: ZGetTotalBalanceCmd::new(None, None).into(),
            marshalled: r#"{"jsonrpc":"1.0","method":"z_gettotalbalance","params":[],"id":1}"#,
            unmarshalled: ZGetTotalBalanceCmd::new(Some(1), Some(false)).into(),
        },
        Case {
            name: "z_gettotalbalance middle default",
            new_cmd: ("z_gettotalbalance", vec![json!("1"), json!("true")]),
            static_cmd: ZGetTotalBalanceCmd::new(None, Some(true)).into(),
            marshalled: r#"{"jsonrpc":"1.0","method":"z_gettotalbalance","params":[1,true],"id":1}"#,
            unmarshalled: ZGetTotalBalanceCmd::new(Some(1), Some(true)).into(),
        },
        Case {
            name: "z_importkey",
            new_cmd: ("z_importkey", vec![json!("secret-extended-key")]),
            static_cmd: ZImportKeyCmd::new("secret-extended-key", None).into(),
            marshalled: r#"{"jsonrpc":"1.0","method":"z_importkey","params":["secret-extended-key"],"id":1}"#,
            unmarshalled: ZImportKeyCmd::new("secret-extended-key", Some(true)).into(),
        },
        Case {
            name: "z_importkey optional",
            new_cmd: ("z_importkey", vec![json!("secret-extended-key"), json!("false")]),
            static_cmd: ZImportKeyCmd::new("secret-extended-key", Some(false)).into(),
            marshalled: r#"{"jsonrpc":"1.0","method":"z_importkey","params":["secret-extended-key",false],"id":1}"#,
            unmarshalled: ZImportKeyCmd::new("secret-extended-key", Some(false)).into(),
        },
        Case {
            name: "z_importwallet",
            new_cmd: ("z_importwallet", vec![json!("backup")]),
            static_cmd: ZImportWalletCmd::new("backup").into(),
            marshalled: r#"{"jsonrpc":"1.0","method":"z_importwallet","params":["backup"],"id":1}"#,
            unmarshalled: ZImportWalletCmd::new("backup").into(),
        },
        Case {
            name: "z_listaddresses",
            new_cmd: ("z_listaddresses", vec![]),
            static_cmd: ZListAddressesCmd::new(None).into(),
            marshalled: r#"{"jsonrpc":"1.0","method":"z_listaddresses","params":[],"id":1}"#,
            unmarshalled: ZListAddressesCmd::new(Some(false)).into(),
        },
        Case {
            name: "z_listoperationids optional",
            new_cmd: ("z_listoperationids", vec![json!("success")]),
            static_cmd: ZListOperationIdsCmd::new(Some("success".to_string())).into(),
            marshalled: r#"{"jsonrpc":"1.0","method":"z_listoperationids","params":["success"],"id":1}"#,
            unmarshalled: ZListOperationIdsCmd::new(Some("success".to_string())).into(),
        },
        Case {
            name: "z_listreceivedbyaddress",
            new_cmd: ("z_listreceivedbyaddress", vec![json!("zs1abc")]),
            static_cmd: ZListReceivedByAddressCmd::new("zs1abc", None).into(),
            marshalled: r#"{"jsonrpc":"1.0","method":"z_listreceivedbyaddress","params":["zs1abc"],"id":1}"#,
            unmarshalled: ZListReceivedByAddressCmd::new("zs1abc", Some(1)).into(),
        },
        Case {
            name: "z_sendmany",
            new_cmd: (
                "z_sendmany",
                vec![json!("myaccount"), json!(r#"[{"address":"t1abc...","amount":1.5}]"#)],
            ),
            static_cmd: ZSendManyCmd::new(
                "myaccount",
                vec![ZSendManyEntry::new("t1abc...", 1.5)],
                None,
                None,
            )
            .into(),
            marshalled: r#"{"jsonrpc":"1.0","method":"z_sendmany","params":["myaccount",[{"address":"t1abc...","amount":1.5,"memo":null}]],"id":1}"#,
            unmarshalled: ZSendManyCmd::new(
                "myaccount",
                vec![ZSendManyEntry::new("t1abc...", 1.5)],
                Some(1),
                Some(0.0001),
            )
            .into(),
        },
        Case {
            name: "z_sendmany optional",
            new_cmd: (
                "z_sendmany",
                vec![
                    json!("myaccount"),
                    json!([{"address": "zs1abc", "amount": 0.25, "memo": "f600"}]),
                    json!(6),
                    json!("0.001"),
                ],
            ),
            static_cmd: ZSendManyCmd::new(
                "myaccount",
                vec![ZSendManyEntry::new("zs1abc", 0.25).with_memo("f600")],
                Some(6),
                Some(0.001),
            )
            .into(),
            marshalled: r#"{"jsonrpc":"1.0","method":"z_sendmany","params":["myaccount",[{"address":"zs1abc","amount":0.25,"memo":"f600"}],6,0.001],"id":1}"#,
            unmarshalled: ZSendManyCmd::new(
                "myaccount",
                vec![ZSendManyEntry::new("zs1abc", 0.25).with_memo("f600")],
                Some(6),
                Some(0.001),
            )
            .into(),
        },
    ]
}

#[test]
fn test_wallet_commands() {
    let registry = wallet_registry().expect("wallet registry");

    for case in cases() {
        let (method, args) = case.new_cmd.clone();
        let untyped = new_cmd(&registry, method, args)
            .unwrap_or_else(|e| panic!("{}: new_cmd failed: {}", case.name, e));

        let from_untyped = marshal_cmd(&registry, 1, &untyped)
            .unwrap_or_else(|e| panic!("{}: marshal of new_cmd failed: {}", case.name, e));
        let from_static = marshal_cmd(&registry, 1, &case.static_cmd)
            .unwrap_or_else(|e| panic!("{}: marshal failed: {}", case.name, e));

        let untyped_bytes = from_untyped.to_vec().expect("encode");
        let static_bytes = from_static.to_vec().expect("encode");
        assert_eq!(untyped_bytes, static_bytes, "{}: construction paths differ", case.name);
        assert_eq!(
            String::from_utf8(static_bytes).expect("utf8"),
            case.marshalled,
            "{}: unexpected wire form",
            case.name
        );

        let request = Request::from_slice(case.marshalled.as_bytes()).expect("parse request");
        let unmarshalled = unmarshal_cmd(&registry, &request)
            .unwrap_or_else(|e| panic!("{}: unmarshal failed: {}", case.name, e));
        assert_eq!(unmarshalled, case.unmarshalled, "{}: unexpected command", case.name);
    }
}

#[test]
fn test_every_command_registered_wallet_only() {
    let registry = wallet_registry().expect("wallet registry");
    assert_eq!(registry.command_count(), 13);
    for name in registry.list_commands() {
        let flags = registry.usage_flags(name).expect("registered");
        assert!(flags.contains(descriptor::UsageFlags::WALLET_ONLY), "{} is not wallet-only", name);
    }
}

#[test]
fn test_usage_text() {
    let registry = wallet_registry().expect("wallet registry");
    assert_eq!(
        registry.usage_text("z_sendmany").expect("registered"),
        r#"z_sendmany "fromaddress" [{"address":address,"amount":amount,...}] (minconf=1 fee=0.0001)"#
    );
    assert_eq!(
        registry.usage_text("z_getoperationstatus").expect("registered"),
        r#"z_getoperationstatus (["operationid",...])"#
    );
    assert_eq!(
        registry.usage_text("z_gettotalbalance").expect("registered"),
        "z_gettotalbalance (minconf=1 includeWatchonly=false)"
    );
}

#[test]
fn test_unmarshal_as() {
    let registry = wallet_registry().expect("wallet registry");
    let request = Request::new(4, "z_listreceivedbyaddress", vec![json!("zs1abc"), json!(3)]);
    let cmd: ZListReceivedByAddressCmd = unmarshal_as(&registry, &request).expect("unmarshal");
    assert_eq!(cmd, ZListReceivedByAddressCmd::new("zs1abc", Some(3)));

    let err = unmarshal_as::<ZExportKeyCmd, _>(&registry, &request).expect_err("wrong method");
    assert!(matches!(err, Error::InvalidRequest(_)));
}

#[test]
fn test_unmarshal_null_optional_takes_default() {
    let registry = wallet_registry().expect("wallet registry");
    let request = Request::from_slice(
        br#"{"jsonrpc":"1.0","method":"z_getbalance","params":[null,null],"id":9}"#,
    )
    .expect("parse");
    let cmd = unmarshal_cmd(&registry, &request).expect("unmarshal");
    assert_eq!(cmd, AnyCommand::from(ZGetBalanceCmd::new(None, Some(1))));
}

#[test]
fn test_wrong_number_of_params() {
    let registry = wallet_registry().expect("wallet registry");

    let too_few = Request::new(1, "z_sendmany", vec![json!("myaccount")]);
    match unmarshal_cmd(&registry, &too_few) {
        Err(Error::WrongNumberOfParams { got: 1, min: 2, max: 4, .. }) => {}
        other => panic!("expected WrongNumberOfParams, got {:?}", other),
    }

    let too_many = Request::new(1, "z_exportkey", vec![json!("a"), json!("b")]);
    match unmarshal_cmd(&registry, &too_many) {
        Err(Error::WrongNumberOfParams { got: 2, min: 1, max: 1, .. }) => {}
        other => panic!("expected WrongNumberOfParams, got {:?}", other),
    }
}

#[test]
fn test_unmarshal_type_error() {
    let registry = wallet_registry().expect("wallet registry");
    let request = Request::new(1, "z_getbalance", vec![json!("t1addr"), json!("six")]);
    match unmarshal_cmd(&registry, &request) {
        Err(Error::UnmarshalType { param, .. }) => assert_eq!(param, "minconf"),
        other => panic!("expected UnmarshalType, got {:?}", other),
    }

    let negative = Request::new(1, "z_getbalance", vec![json!("t1addr"), json!(-1)]);
    assert!(matches!(unmarshal_cmd(&registry, &negative), Err(Error::UnmarshalType { .. })));
}

#[test]
fn test_new_cmd_errors() {
    let registry = wallet_registry().expect("wallet registry");

    match new_cmd(&registry, "z_importkey", vec![]) {
        Err(Error::NumParams { got: 0, min: 1, max: 2, .. }) => {}
        other => panic!("expected NumParams, got {:?}", other),
    }

    match new_cmd(&registry, "z_gettotalbalance", vec![json!("one")]) {
        Err(Error::TypeCoercion { param, .. }) => assert_eq!(param, "minconf"),
        other => panic!("expected TypeCoercion, got {:?}", other),
    }

    match new_cmd(&registry, "z_sendmany", vec![json!("myaccount"), json!([{"address": 5}])]) {
        Err(Error::TypeCoercion { param, .. }) => assert_eq!(param, "amounts"),
        other => panic!("expected TypeCoercion, got {:?}", other),
    }

    match new_cmd(&registry, "z_nosuchcommand", vec![]) {
        Err(Error::Registry(RegistryError::UnknownCommand(name))) => assert_eq!(name, "z_nosuchcommand"),
        other => panic!("expected UnknownCommand, got {:?}", other),
    }
}

#[test]
fn test_marshal_unregistered() {
    let empty = registry::CommandRegistry::default();
    let err = marshal_cmd(&empty, 1, &ZExportKeyCmd::new("zs1abc")).expect_err("not registered");
    assert_eq!(err, Error::Registry(RegistryError::UnknownCommand("z_exportkey".to_string())));
}

#[test]
fn test_minconf_at_default_is_omitted() {
    let registry = wallet_registry().expect("wallet registry");
    let explicit = ZGetBalanceCmd::new(Some("addr".to_string()), Some(1));
    let request = marshal_cmd(&registry, 2, &explicit).expect("marshal");
    assert_eq!(request.params, vec![json!("addr")]);
}

#[test]
fn test_descriptors_match_registry() {
    let registry = wallet_registry().expect("wallet registry");
    for descriptor in AnyCommand::descriptors() {
        assert_eq!(registry.get_command(&descriptor.name), Some(&descriptor));
    }
}

#[test]
fn test_non_finite_amounts_rejected() {
    let registry = wallet_registry().expect("wallet registry");
    let cases = [
        ("nan amount", ZSendManyCmd::new("myaccount", vec![ZSendManyEntry::new("t1abc...", f64::NAN)], None, None)),
        (
            "infinite fee",
            ZSendManyCmd::new("myaccount", vec![ZSendManyEntry::new("t1abc...", 1.5)], None, Some(f64::INFINITY)),
        ),
        (
            "negative infinite amount",
            ZSendManyCmd::new(
                "myaccount",
                vec![ZSendManyEntry::new("t1abc...", 1.5), ZSendManyEntry::new("zs1def", f64::NEG_INFINITY)],
                Some(3),
                None,
            ),
        ),
    ];

    for (name, cmd) in cases {
        match marshal_cmd(&registry, 1, &cmd) {
            Err(Error::Marshal { method, .. }) => assert_eq!(method, "z_sendmany", "{}", name),
            other => panic!("{}: expected Marshal error, got {:?}", name, other),
        }
    }
}

/// Hand-written slots for `z_exportkey`, bypassing the typed constructor.
struct RawExportKey(Vec<Option<Value>>);

impl Marshal for RawExportKey {
    fn method(&self) -> &str { "z_exportkey" }

    fn params(&self) -> Result<Vec<Option<Value>>> { Ok(self.0.clone()) }
}

#[test]
fn test_marshal_errors() {
    let registry = wallet_registry().expect("wallet registry");
    let cases: Vec<(&str, Vec<Option<Value>>)> = vec![
        ("required unset", vec![None]),
        ("required null", vec![Some(Value::Null)]),
        ("wrong type", vec![Some(json!(5))]),
        ("too few slots", vec![]),
        ("too many slots", vec![Some(json!("zs1abc")), Some(json!("extra"))]),
    ];

    for (name, slots) in cases {
        match marshal_cmd(&registry, 1, &RawExportKey(slots)) {
            Err(Error::Marshal { method, .. }) => assert_eq!(method, "z_exportkey", "{}", name),
            other => panic!("{}: expected Marshal error, got {:?}", name, other),
        }
    }

    let ok = marshal_cmd(&registry, 1, &RawExportKey(vec![Some(json!("zs1abc"))])).expect("marshal");
    assert_eq!(ok.params, vec![json!("zs1abc")]);
}

#[test]
fn test_typed_command_against_mismatched_descriptor() {
    let registry = {
        let mut builder = registry::RegistryBuilder::new();
        builder
            .register(
                descriptor::CommandDescriptor::builder("z_exportkey")
                    .required("address", descriptor::ParamType::Integer)
                    .build(),
            )
            .expect("register");
        builder
            .register(
                descriptor::CommandDescriptor::builder("z_importwallet")
                    .required("filename", descriptor::ParamType::String)
                    .required("rescan", descriptor::ParamType::Bool)
                    .build(),
            )
            .expect("register");
        builder.build()
    };

    assert!(matches!(
        marshal_cmd(&registry, 1, &ZExportKeyCmd::new("zs1abc")),
        Err(Error::Marshal { .. })
    ));
    assert!(matches!(
        marshal_cmd(&registry, 1, &ZImportWalletCmd::new("backup")),
        Err(Error::Marshal { .. })
    ));
}
