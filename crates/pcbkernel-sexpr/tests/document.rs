//! Exercises the codec the way a real board file would: several entity
//! lists assembled under one root node, pretty-printed, re-parsed from
//! text, and decoded back — rather than each entity's own unit test,
//! which only round-trips through an in-memory [`SExpr`] tree.

use pcbkernel_core::entities::{Junction, NetLine, NetLineAnchor};
use pcbkernel_core::geometry::Point;
use pcbkernel_core::list::TypedList;
use pcbkernel_core::units::{Length, UnsignedLength};
use pcbkernel_sexpr::{format, load_list, parse, save_list, SExpr};
use uuid::Uuid;

fn uuid(byte: u8) -> Uuid {
    Uuid::from_bytes([byte; 16])
}

#[test]
fn schematic_document_round_trips_through_text() {
    let mut junctions: TypedList<Junction> = TypedList::new();
    let j1 = junctions.append(Junction::new(uuid(1), Point::ORIGIN));
    let j2 = junctions.append(Junction::new(
        uuid(2),
        Point::new(Length::from_mm(1.0).unwrap(), Length::ZERO),
    ));

    let mut lines: TypedList<NetLine> = TypedList::new();
    lines.append(NetLine::new(
        uuid(3),
        UnsignedLength::new(Length::from_nanometers(100_000)).unwrap(),
        NetLineAnchor::Junction(junctions.get(j1).unwrap().uuid()),
        NetLineAnchor::Junction(junctions.get(j2).unwrap().uuid()),
    ));

    let mut root = SExpr::list("schematic");
    save_list(&mut root, &junctions);
    save_list(&mut root, &lines);

    let text = format(&root);
    assert!(text.contains("(junction"));
    assert!(text.contains("(netline"));

    let reparsed = parse(&text).unwrap();
    let decoded_junctions: TypedList<Junction> = load_list(&reparsed, "junction").unwrap();
    let decoded_lines: TypedList<NetLine> = load_list(&reparsed, "netline").unwrap();

    assert_eq!(decoded_junctions.len(), 2);
    assert_eq!(decoded_lines.len(), 1);
    for (decoded, original) in decoded_junctions.iter().zip(junctions.iter()) {
        assert!(decoded == original);
    }

    let line = decoded_lines.first().unwrap();
    assert_eq!(line.p1(), NetLineAnchor::Junction(uuid(1)));
    assert_eq!(line.p2(), NetLineAnchor::Junction(uuid(2)));
}
