use html_escape::{encode_double_quoted_attribute, encode_text};

use super::PageModel;
use crate::error::Result;
use crate::table::{Emphasis, TableView};

fn json_for_script_tag(value: &str) -> String {
    value.replace("</", "<\\/")
}

fn emphasis_class(emphasis: Emphasis) -> &'static str {
    match emphasis {
        Emphasis::Best => "best",
        Emphasis::Worst => "worst",
        Emphasis::None => "",
    }
}

fn render_table(table: &TableView) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<table id=\"{}\" class=\"table table-striped table-bordered table-hover order-column pre\">\n",
        encode_double_quoted_attribute(table.id)
    ));
    out.push_str("  <thead><tr>");
    for column in &table.columns {
        out.push_str(&format!("<th>{}</th>", encode_text(column)));
    }
    out.push_str("</tr></thead>\n  <tbody>\n");
    for row in &table.rows {
        out.push_str("    <tr>");
        out.push_str(&format!(
            "<td class=\"primers\">{}</td>",
            encode_text(&row.forward_primers)
        ));
        out.push_str(&format!(
            "<td class=\"primers\">{}</td>",
            encode_text(&row.reverse_primers)
        ));
        for cell in &row.scores {
            out.push_str(&format!(
                "<td class=\"{}\">{}</td>",
                emphasis_class(cell.emphasis),
                cell.value
            ));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("  </tbody>\n</table>\n");
    out
}

fn render_view_buttons(page: &PageModel) -> String {
    page.views
        .iter()
        .enumerate()
        .map(|(i, view)| {
            format!(
                "<button type=\"button\" class=\"view{}\" data-view=\"{i}\">{}</button>",
                if i == page.active_view { " active" } else { "" },
                encode_text(&view.title)
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ")
}

pub fn render_html(page: &PageModel) -> Result<Vec<u8>> {
    let json = serde_json::to_string(page)?;
    let json = json_for_script_tag(&json);
    let title = encode_text(&page.title);
    let target = encode_double_quoted_attribute(page.chart_target);
    let buttons = render_view_buttons(page);
    let tables = page
        .tables
        .iter()
        .map(|t| {
            format!(
                "<section>\n<h2>{}</h2>\n{}</section>",
                encode_text(t.collection.series_label()),
                render_table(t)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>{title}</title>
  <link rel="stylesheet" href="https://cdn.datatables.net/v/dt/jszip-2.5.0/dt-1.10.21/b-1.6.2/b-html5-1.6.2/sl-1.3.1/datatables.min.css"/>
  <script src="https://code.jquery.com/jquery-3.5.1.min.js"></script>
  <script src="https://cdnjs.cloudflare.com/ajax/libs/pdfmake/0.1.36/pdfmake.min.js"></script>
  <script src="https://cdnjs.cloudflare.com/ajax/libs/pdfmake/0.1.36/vfs_fonts.js"></script>
  <script src="https://cdn.datatables.net/v/dt/jszip-2.5.0/dt-1.10.21/b-1.6.2/b-html5-1.6.2/sl-1.3.1/datatables.min.js"></script>
  <script src="https://cdn.jsdelivr.net/npm/chart.js@2.9.3/dist/Chart.min.js"></script>
  <style>
    body {{ font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 2rem; color: #212529; }}
    .views button {{ margin-right: .5rem; padding: .35rem .9rem; border: 1px solid #6c757d; background: #fff; border-radius: .25rem; cursor: pointer; }}
    .views button.active {{ background: #343a40; color: #fff; }}
    .pre td.primers {{ white-space: pre; }}
    td {{ font-family: SFMono-Regular, Menlo, Monaco, Consolas, "Liberation Mono", "Courier New", monospace; }}
    td.best {{ color: green; }}
    td.worst {{ color: red; }}
    section {{ margin-top: 2.5rem; }}
  </style>
</head>
<body>
  <script type="application/json" id="report-data">{json}</script>
  <h1>{title}</h1>
  <div class="views">
        {buttons}
  </div>
  <canvas id="{target}"></canvas>
{tables}
  <script>
    (function() {{
      const page = JSON.parse(document.getElementById('report-data').textContent || '{{}}');

      function withTooltips(options) {{
        options.tooltips = {{
          callbacks: {{
            label: function(item, data) {{
              return data.datasets[item.datasetIndex].data[item.index].label;
            }}
          }}
        }};
        return options;
      }}

      let chart;
      function show(index) {{
        const view = page.views[index];
        if (!view) return;
        const config = JSON.parse(JSON.stringify(view.config));
        if (chart === undefined) {{
          const ctx = document.getElementById(page.chart_target).getContext('2d');
          chart = new Chart(ctx, {{ type: config.type, data: config.data, options: withTooltips(config.options) }});
        }} else {{
          chart.data = config.data;
          chart.options = withTooltips(config.options);
          chart.update();
        }}
        for (const el of document.querySelectorAll('.views button')) {{
          el.classList.toggle('active', Number(el.getAttribute('data-view')) === index);
        }}
      }}

      for (const el of document.querySelectorAll('.views button')) {{
        el.addEventListener('click', function() {{
          show(Number(el.getAttribute('data-view')));
        }});
      }}

      $(document).ready(function() {{
        show(page.active_view);
        for (const table of page.tables) {{
          $('#' + table.id).DataTable(Object.assign({{}}, page.table_options));
        }}
      }});
    }})();
  </script>
</body>
</html>
"####,
    );

    Ok(html.into_bytes())
}
