/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

mod common;
use common::*;

use bibsuite_tex::{format_groups, group_labels, read_labels, TexError};

#[test]
fn lists_labels_of_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "paper.tex",
        "\\section{Method}\\label{sec:method}\n\
         \\begin{figure}\\label{fig:arch}\\end{figure}\n\
         \\section{Intro}\\label{sec:intro}\n\
         \\label{lemma}\n",
    );

    let labels = read_labels(&path).unwrap();
    assert_eq!(labels, ["sec:method", "fig:arch", "sec:intro", "lemma"]);
    assert_eq!(
        format_groups(&group_labels(&labels)),
        "FIGURES:\n  fig:arch\nSECTIONS:\n  sec:intro\n  sec:method\nUNKNOWN:\n  lemma\n"
    );
}

#[test]
fn unreadable_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_labels(&dir.path().join("missing.tex")).unwrap_err();
    assert!(matches!(err, TexError::Read { .. }));
}
