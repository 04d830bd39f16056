// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default menu styling.

/// Class applied to menus when the caller does not pick one.
pub const DEFAULT_CLASS: &str = "custom-context-menu";

/// Style sheet injected once per [`ContextMenus`](crate::menus::ContextMenus) instance.
pub const DEFAULT_STYLE_SHEET: &str = "\
.custom-context-menu {\
z-index: 1;\
position: absolute;\
background-color: #ffffff;\
border: 1px solid #dfdfdf;\
display: block;\
margin: 0;\
list-style-type: none;\
list-style-position: inside;\
padding-left: 0;\
min-height: 20px;\
min-width: 200px;\
}\
.custom-context-menu li {\
display: block;\
padding: 8px 20px 8px 10px;\
color: #4f4f4f;\
}\
.custom-context-menu li:hover {\
background-color: #dfdfdf;\
text-decoration: none;\
cursor: default;\
}";
