use std::collections::HashSet;

use num_bigint::BigUint;
use test_log::test;

use robdd::bdd::Bdd;
use robdd::reference::Ref;
use robdd::truth_table::TruthTable;

fn vars(bdd: &Bdd) -> Vec<Ref> {
    (0..bdd.num_vars()).map(|v| bdd.mk_var(v)).collect()
}

/// Build `f` in a fresh 3-variable manager and check its truth table and size.
fn check_scenario(name: &str, expected_table: &str, expected_size: u64, build: impl Fn(&Bdd, &[Ref]) -> Ref) {
    let bdd = Bdd::new(3);
    let x = vars(&bdd);
    let f = build(&bdd, &x);

    let table = bdd.to_truth_table(f);
    let expected: TruthTable = expected_table.parse().unwrap();
    // The 2-variable scenarios live in a 3-variable manager and do not depend on x2.
    let expected = if expected.num_vars() == 2 {
        TruthTable::from_bits(3, expected.bits() | (expected.bits() << 4))
    } else {
        expected
    };
    assert_eq!(table, expected, "{}: truth table", name);
    assert_eq!(bdd.size(f), expected_size, "{}: size", name);
    assert_eq!(bdd.check_structure(), Ok(()), "{}: structure", name);
}

#[test]
fn test_xor_two_vars() {
    let bdd = Bdd::new(2);
    let x = vars(&bdd);
    let f = bdd.apply_xor(x[0], x[1]);
    assert_eq!(bdd.to_truth_table(f).to_string(), "0110");
    assert_eq!(bdd.size(f), 3);
}

#[test]
fn test_and_two_vars() {
    let bdd = Bdd::new(2);
    let x = vars(&bdd);
    let f = bdd.apply_and(x[0], x[1]);
    assert_eq!(bdd.to_truth_table(f).to_string(), "1000");
    assert_eq!(bdd.size(f), 2);
}

#[test]
fn test_two_var_scenarios_in_larger_manager() {
    check_scenario("xor", "0110", 3, |bdd, x| bdd.apply_xor(x[0], x[1]));
    check_scenario("and", "1000", 2, |bdd, x| bdd.apply_and(x[0], x[1]));
}

#[test]
fn test_ite_scenarios() {
    check_scenario("ite(x0, x1, x2)", "11011000", 3, |bdd, x| bdd.apply_ite(x[0], x[1], x[2]));
    check_scenario("ite(x1, x0, x0)", "10101010", 1, |bdd, x| bdd.apply_ite(x[1], x[0], x[0]));
    check_scenario("ite(x0, ite(x1, x2, x2), x2)", "11110000", 1, |bdd, x| {
        let inner = bdd.apply_ite(x[1], x[2], x[2]);
        bdd.apply_ite(x[0], inner, x[2])
    });
    check_scenario("ite(x1, x0, x2)", "10111000", 4, |bdd, x| bdd.apply_ite(x[1], x[0], x[2]));
    check_scenario("ite(x0, x0, x0)", "10101010", 1, |bdd, x| bdd.apply_ite(x[0], x[0], x[0]));
    check_scenario("ite(x0, x0, x2)", "11111010", 2, |bdd, x| bdd.apply_ite(x[0], x[0], x[2]));
}

#[test]
fn test_identities() {
    let bdd = Bdd::new(3);
    let x = vars(&bdd);
    let functions = [
        x[0],
        bdd.apply_xor(x[0], x[2]),
        bdd.apply_ite(x[1], x[0], x[2]),
        bdd.apply_and(bdd.apply_not(x[0]), x[1]),
    ];

    assert_eq!(bdd.apply_and(x[0], x[0]), x[0]);
    for f in functions {
        assert_eq!(bdd.apply_ite(f, f, f), f);
        assert_eq!(bdd.apply_xor(f, f), bdd.zero());
        assert_eq!(bdd.apply_and(f, bdd.one()), f);
        assert_eq!(bdd.apply_not(bdd.apply_not(f)), f);
        assert_eq!(bdd.apply_and(f, bdd.apply_not(f)), bdd.zero());
    }
    assert_eq!(bdd.check_structure(), Ok(()));
}

/// Equal truth tables imply equal handles, for every function of two variables.
#[test]
fn test_canonicity() {
    let bdd = Bdd::new(2);
    let x = vars(&bdd);

    let mut seen: Vec<Option<Ref>> = vec![None; 16];
    let candidates = [
        bdd.zero(),
        bdd.one(),
        x[0],
        x[1],
        bdd.literal(0, true),
        bdd.literal(1, true),
    ];
    for &f in &candidates {
        for &g in &candidates {
            for &h in &candidates {
                for r in [bdd.apply_ite(f, g, h), bdd.apply_xor(f, g), bdd.apply_and(g, h)] {
                    let bits = bdd.to_truth_table(r).bits() as usize;
                    match seen[bits] {
                        Some(previous) => assert_eq!(previous, r, "two handles for {:04b}", bits),
                        None => seen[bits] = Some(r),
                    }
                }
            }
        }
    }

    let missing: Vec<String> = (0..16).filter(|&bits| seen[bits].is_none()).map(|bits| format!("{:04b}", bits)).collect();
    assert!(missing.is_empty(), "never built: {:?}", missing);
    let handles: HashSet<Ref> = seen.into_iter().flatten().collect();
    assert_eq!(handles.len(), 16);
    assert_eq!(bdd.check_structure(), Ok(()));
}

/// All 16 functions of two variables, each built as a sum of its minterms.
#[test]
fn test_canonicity_from_minterms() {
    let bdd = Bdd::new(2);
    let minterm = |m: usize| bdd.apply_and(bdd.literal(0, m & 1 == 0), bdd.literal(1, m & 2 == 0));

    let mut handles = HashSet::new();
    for bits in 0..16usize {
        let f = bdd.apply_or_many((0..4).filter(|m| (bits >> m) & 1 == 1).map(minterm));
        assert_eq!(bdd.to_truth_table(f).bits() as usize, bits);
        assert!(handles.insert(f), "handle of {:04b} already used", bits);
    }
    assert_eq!(handles.len(), 16);
    assert_eq!(bdd.check_structure(), Ok(()));
}

#[test]
fn test_operations_match_truth_tables() {
    let bdd = Bdd::new(4);
    let x = vars(&bdd);
    let t: Vec<TruthTable> = (0..4).map(|v| TruthTable::nth_var(4, v, true)).collect();

    let f = bdd.apply_ite(x[2], bdd.apply_xor(x[0], x[3]), bdd.apply_and(x[1], x[0]));
    let tf = (t[2] & (t[0] ^ t[3])) | (!t[2] & (t[1] & t[0]));
    assert_eq!(bdd.to_truth_table(f), tf);

    let g = bdd.apply_not(bdd.apply_or(f, x[1]));
    assert_eq!(bdd.to_truth_table(g), !(tf | t[1]));

    assert_eq!(bdd.sat_count(g), BigUint::from((!(tf | t[1])).count_ones()));
}

#[test]
fn test_num_nodes_monotone_and_size_bounded() {
    let bdd = Bdd::new(3);
    let x = vars(&bdd);
    let mut last = bdd.num_nodes();

    let mut f = x[0];
    for step in 0..10u32 {
        f = match step % 3 {
            0 => bdd.apply_xor(f, x[((step + 1) % 3) as usize]),
            1 => bdd.apply_and(f, bdd.apply_not(x[(step % 3) as usize])),
            _ => bdd.apply_ite(x[2], f, x[1]),
        };
        let now = bdd.num_nodes();
        assert!(now >= last);
        assert!(bdd.size(f) <= now);
        last = now;
    }
}
