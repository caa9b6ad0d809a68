#![allow(dead_code)]

use rawcase::Section;

/// A small two-area system touching every section except GNE devices.
pub const TWO_AREA: &str = "\
0,   100.00, 33, 0, 1, 60.00     / PSS(R)E-33.0    MON, JAN 06 2020  09:00
TWO AREA TEST SYSTEM
NUCLEAR NORTH, HYDRO SOUTH
101,'NUC-A       ', 21.6000,2,   1,   1,   1,1.02000,  -5.0000,1.10000,0.90000,1.10000,0.90000
102,'NUC-B       ', 500.0000,1,   1,   1,   1,1.01000,  -8.5000,1.10000,0.90000,1.10000,0.90000
201,'HYDRO       ', 500.0000,3,   2,   2,   1,1.04000,   0.0000,1.10000,0.90000,1.10000,0.90000
202,'EAST        ', 230.0000,1,   2,   2,   1,0.98500, -12.2500,1.10000,0.90000,1.10000,0.90000
0 / END OF BUS DATA, BEGIN LOAD DATA
102,'1 ',1,   1,   1,  1200.000,   700.000,     0.000,     0.000,     0.000,     0.000,   1,1,0
202,'1 ',1,   2,   2,   300.000,   100.000,     0.000,     0.000,     0.000,     0.000,   1,1
0 / END OF LOAD DATA, BEGIN FIXED SHUNT DATA
202,'1 ',1,     0.000,   100.000
0 / END OF FIXED SHUNT DATA, BEGIN GENERATOR DATA
101,'1 ',   750.000,    81.200,   600.000,  -100.000,1.02000,     0,   900.000, 0.00000E+0, 2.50000E-1, 0.0, 0.0,1.00000,1,  100.0,   810.000,     0.000,   1,1.0000,   0,1.0000,   0,1.0000,   0,1.0000,0, 1.0000
0 / END OF GENERATOR DATA, BEGIN BRANCH DATA
101,     102,'1 ', 2.00000E-3, 2.00000E-2,   0.30000,  1000.00,  1100.00,  1200.00,  0.00000,  0.00000,  0.00000,  0.00000,1,1,    10.00,   1,1.0000,   0,1.0000,   0,1.0000,   0,1.0000
201,     202,'@1', 0.00000E+0, 1.00000E-4,   0.00000,     0.00,     0.00,     0.00,  0.00000,  0.00000,  0.00000,  0.00000,1,1,     0.00,   2,1.0000,   0,1.0000,   0,1.0000,   0,1.0000
0 / END OF BRANCH DATA, BEGIN TRANSFORMER DATA
101,   102,     0,'T1',1,1,1, 0.00000E+0, 0.00000E+0,2,'NUC XFMR    ',1,   1,1.0000,   0,1.0000,   0,1.0000,   0,1.0000,'            '
 0.00000E+0, 1.00000E-2,   100.00
1.00000, 21.600,   0.000,   900.00,   990.00,  1000.00, 0,      0, 1.10000, 0.90000, 1.10000, 0.90000,  33, 0, 0.00000, 0.00000,  0.000
1.00000, 500.000
201,   202,   102,'3W',1,1,1, 0.00000E+0, 0.00000E+0,2,'THREE WIND  ',1,   2,1.0000,   0,1.0000,   0,1.0000,   0,1.0000,'YNyn0d1     '
 1.00000E-3, 5.00000E-2,   100.00, 1.00000E-3, 5.00000E-2,   100.00, 1.00000E-3, 5.00000E-2,   100.00,1.00000,   0.0000
1.00000, 500.000,   0.000,   300.00,   330.00,   360.00, 1,    202, 1.10000, 0.90000, 1.05000, 0.95000,  33, 0, 0.00000, 0.00000,  0.000
1.00000, 230.000,   0.000,   300.00,   330.00,   360.00, 0,      0, 1.10000, 0.90000, 1.10000, 0.90000,  33, 0, 0.00000, 0.00000,  0.000
1.00000, 500.000,   0.000,   100.00,   110.00,   120.00, 0,      0, 1.10000, 0.90000, 1.10000, 0.90000,  33, 0, 0.00000, 0.00000,  0.000
0 / END OF TRANSFORMER DATA, BEGIN AREA DATA
   1,   101,     0.000,    10.000,'NORTH       '
   2,   201,     0.000,    10.000,'SOUTH       '
0 / END OF AREA DATA, BEGIN TWO-TERMINAL DC DATA
'DC1',1,   8.2000,  1000.00,   500.00, 0.00,   0.0000, 0.00000,'I',   0.00, 20, 1.00000
  102,2,  20.00,   5.00, 0.0000,12.0000,  500.00,0.44000,1.00000,1.10000,0.90000,0.00625,     0,     0,     0,'1 ', 0.00000
  202,2,  20.00,  15.00, 0.0000,12.0000,  230.00,0.93000,1.00000,1.10000,0.90000,0.00625,     0,     0,     0,'1 ', 0.00000
0 / END OF TWO-TERMINAL DC DATA, BEGIN VOLTAGE SOURCE CONVERTER DATA
'VDC1',1,   0.7100,   1,1.0000
  102,1,1, -100.00,1.00000, 0.0000, 0.0000, 0.0000,  500.00, 1200.00,1.00000,  100.00, -100.00,     0,100.0
  202,2,1,  100.00,1.00000, 0.0000, 0.0000, 0.0000,  500.00, 1200.00,1.00000,  100.00, -100.00
0 / END OF VOLTAGE SOURCE CONVERTER DATA, BEGIN IMPEDANCE CORRECTION DATA
 1, -30.00, 1.10000,   0.00, 1.00000,  30.00, 1.10000
0 / END OF IMPEDANCE CORRECTION DATA, BEGIN MULTI-TERMINAL DC DATA
'MTDC1',   2,   1,   1, 1,  500, 0.0,      0
  102,2,  20.00,   5.00, 0.0000,12.0000,  500.00,0.44000,1.00000,1.10000,0.90000,0.00625,  100.00,1.00000,0.00000,1
  202,2,  20.00,  15.00, 0.0000,12.0000,  230.00,0.93000,1.00000,1.10000,0.90000,0.00625, -100.00,1.00000,0.00000,1
    1,  102,   1,   1,'DCBUS1      ',    0,   0.0000,   1
    1,    2,'1 ',1,   5.0000,   0.0000
0 / END OF MULTI-TERMINAL DC DATA, BEGIN MULTI-SECTION LINE DATA
  101,   202,'&1',1,   102
0 / END OF MULTI-SECTION LINE DATA, BEGIN ZONE DATA
   1,'ZONE ONE    '
   2,'ZONE TWO    '
0 / END OF ZONE DATA, BEGIN INTER-AREA TRANSFER DATA
   1,   2,'A',   100.00
0 / END OF INTER-AREA TRANSFER DATA, BEGIN OWNER DATA
   1,'OWNER ONE   '
0 / END OF OWNER DATA, BEGIN FACTS CONTROL DEVICE DATA
'FACTS1',   202,     0,1,   0.000,   0.000, 1.00000,    50.000,   100.000,0.90000,1.10000,1.00000,  0.000, 0.05000, 100.0,   1,  0.0000,  0.0000,   0,   0,''
0 / END OF FACTS CONTROL DEVICE DATA, BEGIN SWITCHED SHUNT DATA
  202,1,0,1,1.05000,0.95000,     0,100.0,'            ',   50.00, 2,  25.00, 1, -50.00
0 / END OF SWITCHED SHUNT DATA, BEGIN GNE DEVICE DATA
0 / END OF GNE DEVICE DATA, BEGIN INDUCTION MACHINE DATA
  202,'1 ',1,1,2,   2,   2,   1,1,1,  100.000,    0.000,1,    0.000, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 2.5, 999.0, 999.0, 999.0, 999.0, 0.0, 1.0, 0.0, 1.2, 0.0, 0.0, 0.0, 1.0
0 / END OF INDUCTION MACHINE DATA
Q
";

/// Builds a case from per-section record lines, writing every boundary.
pub fn build(records: &[(Section, &str)]) -> String {
    let mut lines = vec![
        "0, 100.0, 33, 0.0, 0.0, 60.0".to_string(),
        "BUILT CASE".to_string(),
        String::new(),
    ];
    for section in Section::ALL {
        for (_, line) in records.iter().filter(|(s, _)| *s == section) {
            lines.push(line.to_string());
        }
        lines.push(format!("0 / END OF {}", section.title()));
    }
    lines.push("Q".to_string());
    lines.join("\n")
}

pub const BUS: &str = "1,'ONE         ', 138.0,1,1,1,1,1.0,0.0,1.1,0.9,1.1,0.9";
