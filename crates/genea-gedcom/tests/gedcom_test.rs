//! Integration tests for GEDCOM import and export: the literal scenarios
//! plus vendor extensions, encodings, and the semantic round-trip.

use genea_core::enums::{
    ChildRelationship, EvidenceType, FactOwnerKind, FactType, Gender, InformantType,
    LdsOrdinanceType,
};
use genea_gedcom::{export_gedcom, import_gedcom};

const MINIMAL: &str = "\
0 HEAD
1 GEDC
2 VERS 5.5
1 CHAR UTF-8
0 @I1@ INDI
1 NAME John /Doe/
1 SEX M
1 BIRT
2 DATE 15 JAN 1850
2 PLAC Springfield, IL
0 TRLR
";

#[test]
fn minimal_import_maps_person_fields() {
    let result = import_gedcom(MINIMAL.as_bytes()).unwrap();
    assert!(result.errors.is_empty());
    assert_eq!(result.persons.len(), 1);

    let person = &result.persons[0];
    assert_eq!(person.given.as_deref(), Some("John"));
    assert_eq!(person.surname.as_deref(), Some("Doe"));
    assert_eq!(person.gender, Gender::Male);
    assert_eq!(person.xref.as_deref(), Some("@I1@"));

    let birth = person.birth_date.as_ref().unwrap();
    assert_eq!(birth.raw, "15 JAN 1850");
    assert_eq!(birth.year, Some(1850));
    assert_eq!(
        person.birth_place.as_ref().map(|p| p.name.as_str()),
        Some("Springfield, IL")
    );
}

#[test]
fn minimal_round_trip_emits_same_lines() {
    let imported = import_gedcom(MINIMAL.as_bytes()).unwrap();
    let exported = export_gedcom(&imported, None).unwrap().gedcom;

    assert!(exported.contains("1 NAME John /Doe/\n"));
    assert!(exported.contains("1 SEX M\n"));
    assert!(exported.contains("2 DATE 15 JAN 1850\n"));
    assert!(exported.contains("2 PLAC Springfield, IL\n"));
    assert!(exported.contains("0 @I1@ INDI\n"), "original xref preserved");
    assert!(exported.ends_with("0 TRLR\n"));

    // And the re-import agrees with the first one.
    let again = import_gedcom(exported.as_bytes()).unwrap();
    assert_eq!(again.persons.len(), 1);
    assert_eq!(again.persons[0].given.as_deref(), Some("John"));
    assert_eq!(
        again.persons[0].birth_date.as_ref().unwrap().raw,
        "15 JAN 1850"
    );
}

#[test]
fn negated_death_never_touches_scalar_fields() {
    let input = "\
0 HEAD
1 CHAR UTF-8
0 @I1@ INDI
1 NAME Alice /Living/
1 BIRT
2 DATE 15 JAN 1990
1 NO DEAT
0 TRLR
";
    let result = import_gedcom(input.as_bytes()).unwrap();
    let person = &result.persons[0];
    assert!(person.death_date.is_none());
    assert!(person.death_place.is_none());
    assert_eq!(person.birth_date.as_ref().unwrap().year, Some(1990));

    let negated: Vec<_> = result.life_events.iter().filter(|e| e.is_negated).collect();
    assert_eq!(negated.len(), 1);
    assert_eq!(negated[0].fact_type, FactType::Death);
    assert!(negated[0].date.is_none());
    assert!(negated[0].place.is_none());

    // Export re-emits the negation.
    let exported = export_gedcom(&result, None).unwrap().gedcom;
    assert!(exported.contains("1 NO DEAT\n"));
    assert!(!exported.contains("1 DEAT\n"));
}

#[test]
fn pedi_values_map_to_child_relationships() {
    let input = "\
0 HEAD
1 CHAR UTF-8
0 @I1@ INDI
1 NAME A //
1 FAMC @F1@
2 PEDI birth
0 @I2@ INDI
1 NAME B //
1 FAMC @F1@
2 PEDI adopted
0 @I3@ INDI
1 NAME C //
1 FAMC @F1@
2 PEDI foster
0 @F1@ FAM
1 CHIL @I1@
1 CHIL @I2@
1 CHIL @I3@
0 TRLR
";
    let result = import_gedcom(input.as_bytes()).unwrap();
    let relationships: Vec<ChildRelationship> = result
        .family_children
        .iter()
        .map(|c| c.relationship)
        .collect();
    assert_eq!(
        relationships,
        vec![
            ChildRelationship::Biological,
            ChildRelationship::Adopted,
            ChildRelationship::Foster,
        ]
    );
    // Sequence follows file order.
    let sequences: Vec<i32> = result.family_children.iter().map(|c| c.sequence).collect();
    assert_eq!(sequences, vec![0, 1, 2]);

    // Round-trip keeps the non-default pedigrees.
    let exported = export_gedcom(&result, None).unwrap().gedcom;
    assert!(exported.contains("2 PEDI adopted\n"));
    assert!(exported.contains("2 PEDI foster\n"));
    let again = import_gedcom(exported.as_bytes()).unwrap();
    let relationships: Vec<ChildRelationship> = again
        .family_children
        .iter()
        .map(|c| c.relationship)
        .collect();
    assert_eq!(
        relationships,
        vec![
            ChildRelationship::Biological,
            ChildRelationship::Adopted,
            ChildRelationship::Foster,
        ]
    );
}

#[test]
fn negative_evidence_citation_omits_quay() {
    let mut data = import_gedcom(MINIMAL.as_bytes()).unwrap();
    let person_id = data.persons[0].id;

    let now = chrono::Utc::now();
    let source_id = uuid::Uuid::now_v7();
    data.sources.push(genea_core::types::Source {
        id: source_id,
        title: "Parish register".into(),
        created_at: now,
        updated_at: now,
        ..Default::default()
    });
    data.citations.push(genea_core::types::Citation {
        id: uuid::Uuid::now_v7(),
        source_id,
        fact_type: FactType::Birth,
        owner_kind: FactOwnerKind::Person,
        owner_id: person_id,
        page: Some("p. 4".into()),
        volume: None,
        source_quality: None,
        informant_type: None,
        evidence_type: Some(EvidenceType::Negative),
        text: None,
        analysis: None,
        apid: None,
        version: 0,
        created_at: now,
        updated_at: now,
    });

    let exported = export_gedcom(&data, None).unwrap().gedcom;
    assert!(exported.contains("2 SOUR @S1@\n"));
    assert!(exported.contains("3 PAGE p. 4\n"));
    assert!(!exported.contains("QUAY"), "QUAY 0 is the default, omitted");
}

#[test]
fn quay_values_round_trip_through_import() {
    let input = "\
0 HEAD
1 CHAR UTF-8
0 @S1@ SOUR
1 TITL Census
0 @I1@ INDI
1 NAME X /Y/
1 BIRT
2 DATE 1900
2 SOUR @S1@
3 PAGE line 7
3 QUAY 3
0 TRLR
";
    let result = import_gedcom(input.as_bytes()).unwrap();
    let citation = &result.citations[0];
    assert_eq!(citation.evidence_type, Some(EvidenceType::Direct));
    assert_eq!(citation.informant_type, Some(InformantType::Primary));
    assert_eq!(citation.fact_type, FactType::Birth);
    assert_eq!(citation.page.as_deref(), Some("line 7"));

    let exported = export_gedcom(&result, None).unwrap().gedcom;
    assert!(exported.contains("3 QUAY 3\n"));
}

#[test]
fn vendor_extensions_survive() {
    let input = "\
0 HEAD
1 SOUR Ancestry.com Family Trees
1 CHAR UTF-8
0 @S1@ SOUR
1 TITL 1900 United States Federal Census
0 @I1@ INDI
1 NAME Mary /Todd/
1 _FSFTID KWCH-8Z2
1 BIRT
2 DATE 1842
2 SOUR @S1@
3 _APID 1,7602::12345
0 TRLR
";
    let result = import_gedcom(input.as_bytes()).unwrap();
    assert_eq!(result.vendor.as_deref(), Some("Ancestry.com Family Trees"));
    assert_eq!(result.persons[0].fsftid.as_deref(), Some("KWCH-8Z2"));

    let apid = result.citations[0].apid.as_ref().unwrap();
    assert_eq!(apid.revision, "1");
    assert_eq!(apid.db, "7602");
    assert_eq!(apid.record, "12345");

    let exported = export_gedcom(&result, None).unwrap().gedcom;
    assert!(exported.contains("1 _FSFTID KWCH-8Z2\n"));
    assert!(exported.contains("3 _APID 1,7602::12345\n"));
}

#[test]
fn lds_ordinances_round_trip() {
    let input = "\
0 HEAD
1 CHAR UTF-8
0 @I1@ INDI
1 NAME Brigham /Y/
1 BAPL
2 DATE 12 MAY 1840
2 TEMP SLAKE
1 ENDL
2 DATE 1841
0 @I2@ INDI
1 NAME Partner /Z/
0 @F1@ FAM
1 HUSB @I1@
1 WIFE @I2@
1 SLGS
2 DATE 1842
2 TEMP NAUVO
0 TRLR
";
    let result = import_gedcom(input.as_bytes()).unwrap();
    assert_eq!(result.ordinances.len(), 3);

    let baptism = result
        .ordinances
        .iter()
        .find(|o| o.ordinance_type == LdsOrdinanceType::Baptism)
        .unwrap();
    assert_eq!(baptism.owner_kind, FactOwnerKind::Person);
    assert_eq!(baptism.temple.as_deref(), Some("SLAKE"));

    let sealing = result
        .ordinances
        .iter()
        .find(|o| o.ordinance_type == LdsOrdinanceType::SealingSpouse)
        .unwrap();
    assert_eq!(sealing.owner_kind, FactOwnerKind::Family);

    let exported = export_gedcom(&result, None).unwrap().gedcom;
    assert!(exported.contains("1 BAPL\n"));
    assert!(exported.contains("1 ENDL\n"));
    assert!(exported.contains("1 SLGS\n"));
    assert!(exported.contains("2 TEMP SLAKE\n"));
}

#[test]
fn coordinates_and_addresses_round_trip() {
    let input = "\
0 HEAD
1 CHAR UTF-8
0 @I1@ INDI
1 NAME Pierre /Sud/
1 BIRT
2 DATE 1900
2 PLAC Valparaiso, Chile
3 MAP
4 LATI S33.0458
4 LONG W71.6197
1 RESI on the hill
2 ADDR 12 Cerro Alegre
3 CITY Valparaiso
3 CTRY Chile
0 TRLR
";
    let result = import_gedcom(input.as_bytes()).unwrap();
    let place = result.persons[0].birth_place.as_ref().unwrap();
    assert_eq!(place.latitude, Some(-33.0458));
    assert_eq!(place.longitude, Some(-71.6197));

    let residence = result
        .attributes
        .iter()
        .find(|a| a.attribute_type == genea_core::enums::AttributeType::Residence)
        .unwrap();
    assert_eq!(residence.value, "on the hill");

    let exported = export_gedcom(&result, None).unwrap().gedcom;
    assert!(exported.contains("4 LATI S33.0458\n"));
    assert!(exported.contains("4 LONG W71.6197\n"));
}

#[test]
fn multiple_names_keep_single_primary() {
    let input = "\
0 HEAD
1 CHAR UTF-8
0 @I1@ INDI
1 NAME Anna /Schmidt/
1 NAME Anna /Miller/
2 TYPE married
0 TRLR
";
    let result = import_gedcom(input.as_bytes()).unwrap();
    assert_eq!(result.person_names.len(), 2);
    let primaries: Vec<_> = result.person_names.iter().filter(|n| n.is_primary).collect();
    assert_eq!(primaries.len(), 1);
    assert_eq!(primaries[0].surname.as_deref(), Some("Schmidt"));

    let exported = export_gedcom(&result, None).unwrap().gedcom;
    assert!(exported.contains("1 NAME Anna /Schmidt/\n"));
    assert!(exported.contains("1 NAME Anna /Miller/\n"));
    assert!(exported.contains("2 TYPE married\n"));
}

#[test]
fn missing_name_warns_and_defaults_to_unknown() {
    let input = "\
0 HEAD
1 CHAR UTF-8
0 @I1@ INDI
1 SEX F
0 TRLR
";
    let result = import_gedcom(input.as_bytes()).unwrap();
    assert_eq!(result.persons[0].given.as_deref(), Some("Unknown"));
    assert!(result.warnings.iter().any(|w| w.contains("has no name")));
}

#[test]
fn dangling_family_refs_warn_but_family_survives() {
    let input = "\
0 HEAD
1 CHAR UTF-8
0 @F1@ FAM
1 HUSB @I99@
1 CHIL @I98@
0 TRLR
";
    let result = import_gedcom(input.as_bytes()).unwrap();
    assert_eq!(result.families.len(), 1, "partial family still created");
    assert!(result.families[0].partner1_id.is_none());
    assert!(result.family_children.is_empty());
    assert!(result.warnings.iter().any(|w| w.contains("@I99@")));
    assert!(result.warnings.iter().any(|w| w.contains("@I98@")));
}

#[test]
fn notes_with_continuations_round_trip() {
    let input = "\
0 HEAD
1 CHAR UTF-8
0 @N1@ NOTE He emigrated about 1880
1 CONT and settled near the river.
0 TRLR
";
    let result = import_gedcom(input.as_bytes()).unwrap();
    assert_eq!(
        result.notes[0].text,
        "He emigrated about 1880\nand settled near the river."
    );

    let exported = export_gedcom(&result, None).unwrap().gedcom;
    assert!(exported.contains("0 @N1@ NOTE He emigrated about 1880\n"));
    assert!(exported.contains("1 CONT and settled near the river.\n"));
}

#[test]
fn unknown_dates_round_trip_via_raw() {
    let input = "\
0 HEAD
1 CHAR UTF-8
0 @I1@ INDI
1 NAME X /Y/
1 BIRT
2 DATE in the spring of 1850
0 TRLR
";
    let result = import_gedcom(input.as_bytes()).unwrap();
    let date = result.persons[0].birth_date.as_ref().unwrap();
    assert_eq!(date.year, None);
    assert_eq!(date.raw, "in the spring of 1850");
    assert!(result.warnings.iter().any(|w| w.contains("unparsed date")));

    let exported = export_gedcom(&result, None).unwrap().gedcom;
    assert!(exported.contains("2 DATE in the spring of 1850\n"));
}

#[test]
fn windows_1252_input_decodes() {
    let mut bytes = b"0 HEAD\n1 CHAR ANSI\n0 @I1@ INDI\n1 NAME Fran".to_vec();
    bytes.push(0xE7); // ç in Windows-1252
    bytes.extend_from_slice(b"ois /Dupont/\n0 TRLR\n");
    let result = import_gedcom(&bytes).unwrap();
    assert_eq!(result.persons[0].given.as_deref(), Some("Fran\u{e7}ois"));
}

#[test]
fn progress_callback_reports_phases_and_can_cancel() {
    let data = import_gedcom(MINIMAL.as_bytes()).unwrap();

    let mut phases = Vec::new();
    let mut callback = |p: &genea_gedcom::ExportProgress| {
        phases.push(p.phase);
        Ok(())
    };
    export_gedcom(&data, Some(&mut callback)).unwrap();
    assert_eq!(
        phases,
        vec![
            genea_gedcom::ExportPhase::Sources,
            genea_gedcom::ExportPhase::Persons,
            genea_gedcom::ExportPhase::Families,
            genea_gedcom::ExportPhase::Notes,
            genea_gedcom::ExportPhase::Submitters,
            genea_gedcom::ExportPhase::Encoding,
            genea_gedcom::ExportPhase::Complete,
        ]
    );

    // A callback error aborts the export and surfaces verbatim.
    let mut cancel = |p: &genea_gedcom::ExportProgress| {
        if p.phase == genea_gedcom::ExportPhase::Families {
            Err(genea_core::GeneaError::Cancelled("user abort".into()))
        } else {
            Ok(())
        }
    };
    let err = export_gedcom(&data, Some(&mut cancel)).unwrap_err();
    assert!(matches!(err, genea_core::GeneaError::Cancelled(_)));
    assert_eq!(err.to_string(), "operation cancelled: user abort");
}

#[test]
fn unreadable_stream_is_the_only_fatal_import() {
    assert!(import_gedcom(&[]).is_err());

    // Arbitrary binary junk that still decodes as Windows-1252 but has no
    // records.
    let junk = [0x01u8, 0x02, 0x03];
    assert!(import_gedcom(&junk).is_err());
}
