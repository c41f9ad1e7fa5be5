//! HTML folder view

use std::fmt::Write;

use crate::navigate::VirtualPath;
use crate::server::handlers::UPLOAD_FIELD;
use crate::tree::{Entry, Folder};

/// Escape text for HTML bodies and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the listing of `folder`, reached via `path`
pub fn render_folder(path: &VirtualPath, folder: &Folder) -> String {
    let here = escape_html(&path.to_string());
    let title = escape_html(folder.name());
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n<h1>{title}</h1>\n<p>{here}</p>\n"
    );

    if let Some(parent) = path.parent() {
        let _ = writeln!(
            html,
            "<p><a href=\"{}\">.. up</a></p>",
            escape_html(&parent.encoded())
        );
    }

    html.push_str("<ul>\n");
    for entry in folder.entries() {
        match entry {
            Entry::Folder(child) => render_folder_row(&mut html, path, child),
            Entry::File(file) => render_file_row(&mut html, &here, file.name()),
        }
    }
    html.push_str("</ul>\n");

    let _ = write!(
        html,
        "<form method=\"post\" action=\"/createFolder\">\
<input type=\"hidden\" name=\"path\" value=\"{here}\">\
<button type=\"submit\">New folder</button></form>\n\
<form method=\"post\" action=\"/uploadFile\" enctype=\"multipart/form-data\">\
<input type=\"hidden\" name=\"path\" value=\"{here}\">\
<input type=\"file\" name=\"{UPLOAD_FIELD}\">\
<button type=\"submit\">Upload</button></form>\n</body>\n</html>\n"
    );

    html
}

fn render_folder_row(html: &mut String, path: &VirtualPath, child: &Folder) {
    let child_path = path.child(child.name());
    let name = escape_html(child.name());
    let _ = writeln!(
        html,
        "<li>[dir] <a href=\"{href}\">{name}</a> \
<form method=\"post\" action=\"/changeFolderName\">\
<input type=\"hidden\" name=\"folderPath\" value=\"{value}\">\
<input type=\"text\" name=\"folderName\" value=\"{name}\">\
<button type=\"submit\">Rename</button></form></li>",
        href = escape_html(&child_path.encoded()),
        value = escape_html(&child_path.to_string()),
    );
}

fn render_file_row(html: &mut String, here: &str, file_name: &str) {
    let name = escape_html(file_name);
    let _ = writeln!(
        html,
        "<li>{name} \
<form method=\"post\" action=\"/downloadFile\">\
<input type=\"hidden\" name=\"path\" value=\"{here}\">\
<input type=\"hidden\" name=\"filename\" value=\"{name}\">\
<button type=\"submit\">Download</button></form> \
<form method=\"post\" action=\"/deleteFile\">\
<input type=\"hidden\" name=\"path\" value=\"{here}\">\
<input type=\"hidden\" name=\"filename\" value=\"{name}\">\
<button type=\"submit\">Delete</button></form> \
<form method=\"post\" action=\"/changeFileName\">\
<input type=\"hidden\" name=\"filePath\" value=\"{here}\">\
<input type=\"hidden\" name=\"oldFileName\" value=\"{name}\">\
<input type=\"text\" name=\"fileName\" value=\"{name}\">\
<button type=\"submit\">Rename</button></form></li>"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::demo_tree;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html("<a href=\"x\">&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn root_view_lists_entries_in_order_without_up_link() {
        let root = demo_tree();
        let html = render_folder(&VirtualPath::root(), &root);
        assert!(html.contains("<title>My finder</title>"));
        assert!(!html.contains(".. up"));

        let loli = html.find("href=\"/files/Loli/\"").unwrap();
        let holy = html.find("href=\"/files/Holy/\"").unwrap();
        let file = html.find("<li>file.txt").unwrap();
        assert!(loli < holy && holy < file);
        assert!(html.contains("name=\"myFile\""));
    }

    #[test]
    fn nested_view_links_to_parent_and_escapes_names() {
        let mut folder = Folder::new("Docs");
        folder.add_file("<script>.txt");
        let path = VirtualPath::root().child("Docs");
        let html = render_folder(&path, &folder);

        assert!(html.contains("<a href=\"/files/\">.. up</a>"));
        assert!(html.contains("&lt;script&gt;.txt"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("value=\"/files/Docs/\""));
    }
}
