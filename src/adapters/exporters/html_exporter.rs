use crate::core::errors::Result;
use crate::core::models::audit_event::AuditEvent;
use crate::core::traits::exporter::Exporter;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>GitLab Audit Export</title>
<style>
body{font-family:system-ui,Arial,Helvetica,sans-serif;margin:20px;color:#222;}
table{border-collapse:collapse;width:100%;font-size:13px;}
th,td{border:1px solid #ddd;padding:6px;text-align:left;vertical-align:top;}
th{background:#f2f2f2;cursor:pointer;user-select:none;position:sticky;top:0;}
th.asc::after{content:" \25B2";}
th.desc::after{content:" \25BC";}
tbody tr:nth-child(even){background:#fafafa;}
#searchBox{margin-bottom:10px;padding:6px;width:320px;}
.count{color:#666;margin-left:10px;}
</style>
</head>
<body>
<h2>GitLab Audit Export</h2>
"#;

/// Sorting toggles per column; search hides rows not containing the query.
const PAGE_SCRIPT: &str = r#"<script>
(function(){
  const table=document.getElementById('auditTable');
  const body=table.tBodies[0];
  const headers=table.querySelectorAll('th');
  headers.forEach((th,idx)=>{
    th.addEventListener('click',()=>{
      const asc=!th.classList.contains('asc');
      headers.forEach(h=>h.classList.remove('asc','desc'));
      th.classList.add(asc?'asc':'desc');
      const rows=[...body.rows];
      rows.sort((a,b)=>{
        const av=a.cells[idx].textContent.trim().toLowerCase();
        const bv=b.cells[idx].textContent.trim().toLowerCase();
        return av.localeCompare(bv)*(asc?1:-1);
      });
      rows.forEach(r=>body.appendChild(r));
    });
  });
  document.getElementById('searchBox').addEventListener('input',function(){
    const q=this.value.toLowerCase();
    [...body.rows].forEach(r=>{
      r.style.display=r.textContent.toLowerCase().includes(q)?'':'none';
    });
  });
})();
</script>
</body>
</html>
"#;

/// Self-contained HTML page with a sortable, searchable table.
///
/// Columns follow first-seen order, which is the canonical field order.
/// The page makes no network requests.
pub struct HtmlExporter;

impl HtmlExporter {
    fn columns(events: &[AuditEvent]) -> Vec<&'static str> {
        let mut columns: Vec<&'static str> = Vec::new();
        for (name, _) in events.iter().flat_map(|e| e.fields()) {
            if !columns.contains(&name) {
                columns.push(name);
            }
        }
        columns
    }
}

impl Exporter for HtmlExporter {
    fn render(&self, events: &[AuditEvent]) -> Result<String> {
        let columns = Self::columns(events);
        let mut page = String::from(PAGE_HEAD);

        page.push_str(r#"<input type="text" id="searchBox" placeholder="Search...">"#);
        page.push_str(&format!(r#"<span class="count">{} rows</span>"#, events.len()));
        page.push_str("\n<table id=\"auditTable\">\n<thead><tr>");
        for column in &columns {
            page.push_str(&format!("<th>{}</th>", escape_html(column)));
        }
        page.push_str("</tr></thead>\n<tbody>\n");

        for event in events {
            page.push_str("<tr>");
            for column in &columns {
                let value = event.field(column).unwrap_or("");
                page.push_str(&format!("<td>{}</td>", escape_html(value)));
            }
            page.push_str("</tr>\n");
        }

        page.push_str("</tbody>\n</table>\n");
        page.push_str(PAGE_SCRIPT);
        Ok(page)
    }

    fn name(&self) -> &str {
        "html"
    }

    fn extension(&self) -> &str {
        "html"
    }
}

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
