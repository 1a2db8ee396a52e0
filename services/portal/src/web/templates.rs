//! services/portal/src/web/templates.rs
//!
//! HTML for the two portal pages. The markup mirrors the real portal's ids and
//! class names closely enough that scrapers written against it work here.

use attendance_core::{DayView, Outcome, SessionDetailView, SessionView, Status};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Name of the form field carrying the attendance code.
pub const CODE_FIELD: &str = "ctl00$ContentPlaceHolder1$txtAttendanceCode";

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

// Unreserved characters per RFC 3986 stay as they are.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encodes a query string value, then escapes it for an attribute.
fn query_value(raw: &str) -> String {
    escape(&utf8_percent_encode(raw, QUERY_VALUE).to_string())
}

fn status_title(status: Status) -> &'static str {
    match status {
        Status::Pending => "Pending",
        Status::Submitted => "Submitted",
        Status::Locked => "Locked",
    }
}

//=========================================================================================
// Units.aspx
//=========================================================================================

fn render_entry_item(entry: &SessionView, anchor: &str, first: bool, last: bool) -> String {
    let mut classes = vec!["ui-li-has-icon"];
    if first {
        classes.push("ui-first-child");
    }
    if last {
        classes.push("ui-last-child");
    }
    let icon = if entry.status == Status::Submitted {
        "tick.png"
    } else {
        "question.png"
    };
    let text = format!(
        "{} {} {}",
        escape(&entry.time_label),
        escape(&entry.course_code),
        escape(&entry.slot_label)
    );

    match entry.status {
        Status::Pending => format!(
            "            <li class=\"{}\"><a href=\"Entry.aspx?s={}&d={}\" onclick=\"$.mobile.loading('show');\" class=\"ui-btn ui-btn-icon-right ui-icon-carat-r\"><img class=\"ui-li-icon\" src=\"./img/{}\">{}</a></li>",
            classes.join(" "),
            query_value(&entry.session_id),
            query_value(anchor),
            icon,
            text
        ),
        Status::Submitted | Status::Locked => {
            if entry.status == Status::Locked {
                classes.push("ui-disabled");
            }
            classes.extend(["ui-li-static", "ui-body-inherit"]);
            format!(
                "            <li class=\"{}\"><img class=\"ui-li-icon\" src=\"./img/{}\">{}</li>",
                classes.join(" "),
                icon,
                text
            )
        }
    }
}

fn render_day_panel(day: &DayView, visible: bool) -> String {
    let style = if visible { "" } else { " style=\"display:none;\"" };
    let mut lines = vec![format!(
        "    <div class=\"dayPanel\" id=\"dayPanel_{}\"{}>",
        escape(&day.anchor),
        style
    )];
    if day.entries.is_empty() {
        lines.push("        <div class=\"noticeMessage\">Nothing on this day</div>".to_string());
    } else {
        lines.push(
            "        <ul data-role=\"listview\" data-inset=\"true\" class=\"ui-listview ui-listview-inset ui-corner-all ui-shadow\">"
                .to_string(),
        );
        let last = day.entries.len() - 1;
        for (idx, entry) in day.entries.iter().enumerate() {
            lines.push(render_entry_item(entry, &day.anchor, idx == 0, idx == last));
        }
        lines.push("        </ul>".to_string());
    }
    lines.push("    </div>".to_string());
    lines.join("\n")
}

/// Renders the "Choose day and activity" page. The first day starts selected.
pub fn render_units_page(days: &[DayView], base_href: &str, student_name: &str) -> String {
    let placeholder = [DayView {
        anchor: "0".to_string(),
        label: "No sessions available".to_string(),
        entries: Vec::new(),
    }];
    let days = if days.is_empty() { &placeholder[..] } else { days };
    let selected = days.first().map(|d| d.anchor.as_str()).unwrap_or_default();

    let options = days
        .iter()
        .map(|day| {
            let marker = if day.anchor == selected {
                " selected=\"selected\""
            } else {
                ""
            };
            format!(
                "            <option value=\"{}\"{}>{}</option>",
                escape(&day.anchor),
                marker,
                escape(&day.label)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let panels = days
        .iter()
        .map(|day| render_day_panel(day, day.anchor == selected))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r##"<!DOCTYPE html><html class="ui-mobile"><head><base href="{base}">
	<title>Choose day and activity</title>
	<meta name="viewport" content="width=device-width, initial-scale=1,maximum-scale=1, user-scalable=no">
	<link rel="stylesheet" href="./jqm/monash.min.css">
	<link rel="stylesheet" href="./jqm/jquery.mobile.icons-1.4.1.min.css">
	<link rel="stylesheet" href="./jqm/jquery.mobile.structure-1.4.1.min.css">
	<link rel="stylesheet" href="./jqm/monash_adjustments.css">
	<script src="./jq/jquery-1.11.0.min.js"></script>
	<script src="./jqm/customPageScript.js"></script>
	<script src="./jqm/jquery.mobile-1.4.1.min.js"></script>
	<style type="text/css">
	#monashLogo {{ width:325px; height:60px; }}
	@media only screen and (max-width: 350px) {{
	    #monashLogo {{ width:220px!important; height:41px!important; }}
	}}
	</style>
</head>
<body class="ui-mobile-viewport ui-overlay-a" style="">
<div data-role="page" data-url="/student/Units.aspx" tabindex="0" class="ui-page ui-page-theme-a ui-page-footer-fixed ui-page-active" style="padding-bottom: 36px; min-height: 684px;">

	<div id="ctl00_pageHeader" data-role="header" role="banner" class="ui-header ui-bar-inherit">
		<a href="./Default.aspx" id="ctl00_homeButton" data-icon="home" data-theme="b" data-iconpos="notext" class="ui-link ui-btn-left ui-btn ui-btn-b ui-icon-home ui-btn-icon-notext ui-shadow ui-corner-all" data-role="button" role="button">Home</a>
		<h1 style="margin-left: 5%;margin-right: 5%;" class="ui-title" role="heading" aria-level="1"><span id="ctl00_pageHeaderText">Choose day and activity</span></h1>
	</div>

	<div data-role="content" class="ui-content" role="main">

<div style="text-align:center;color:#909090;margin-bottom:14px;"><span id="ctl00_ContentPlaceHolder1_userName">{student}</span></div>

<script>
$(document).ready(function(){{
    function showSelectedPanel(sel)
    {{
        if(sel!=undefined && $('#daySel').val()!=sel){{
            $('#daySel').val(sel);
            $('#daySel').selectmenu('refresh');
        }}
        if(sel==undefined){{
            sel = $('#daySel').val();
        }}
        $('.dayPanel').filter(':visible').hide();
        $('#dayPanel_'+sel).show();
        window.location.hash = '#' + sel;
    }}

    showSelectedPanel(window.location.hash.length>0?window.location.hash.replace('#',''):undefined);

    $('#daySel').change(function(){{
        showSelectedPanel();
    }});
}});
</script>

    <div data-role="fieldcontain" class="ui-field-contain">
        <label for="daySel" class="select">Select a day</label>
        <select id="daySel" data-native-menu="false">
{options}
        </select>
    </div>

{panels}

	</div>

    <div id="ctl00_footer" data-role="footer" data-position="fixed" role="contentinfo" class="ui-footer ui-footer-fixed slideup ui-bar-inherit">
		<div data-role="navbar" class="ui-navbar" role="navigation">
			<ul class="ui-grid-solo">
				<li class="ui-block-a"><a data-role="button" href="SignOut.aspx" class="ui-link ui-btn ui-shadow ui-corner-all" role="button">Logout</a></li>
			</ul>
		</div>
	</div>

</div>

<div class="ui-loader ui-corner-all ui-body-a ui-loader-default"><span class="ui-icon-loading"></span><h1>loading</h1></div></body></html>"##,
        base = escape(base_href),
        student = escape(student_name),
        options = options,
        panels = panels,
    )
}

//=========================================================================================
// Entry.aspx
//=========================================================================================

/// Renders the code submission page, with a banner when `outcome` is set.
pub fn render_entry_page(
    view: &SessionDetailView,
    base_href: &str,
    outcome: Option<Outcome>,
) -> String {
    let notice = match outcome {
        Some(outcome) => {
            let banner_class = if outcome.is_accepted() {
                "ui-body-b"
            } else {
                "ui-body-a"
            };
            format!(
                "<div class=\"{} ui-corner-all\" style=\"padding:12px;margin-bottom:12px;\">{}</div>",
                banner_class,
                escape(outcome.message())
            )
        }
        None => String::new(),
    };

    format!(
        r##"<!DOCTYPE html><html class="ui-mobile"><head><base href="{base}">
<title>Submit attendance code</title>
<meta name="viewport" content="width=device-width, initial-scale=1,maximum-scale=1, user-scalable=no">
<link rel="stylesheet" href="./jqm/monash.min.css">
<link rel="stylesheet" href="./jqm/jquery.mobile.icons-1.4.1.min.css">
<link rel="stylesheet" href="./jqm/jquery.mobile.structure-1.4.1.min.css">
<link rel="stylesheet" href="./jqm/monash_adjustments.css">
<script src="./jq/jquery-1.11.0.min.js"></script>
<script src="./jqm/jquery.mobile-1.4.1.min.js"></script>
</head>
<body class="ui-mobile-viewport ui-overlay-a" style="">
<div data-role="page" data-url="/student/Entry.aspx" tabindex="0" class="ui-page ui-page-theme-a ui-page-footer-fixed ui-page-active" style="padding-bottom: 36px; min-height: 684px;">
    <div data-role="header" role="banner" class="ui-header ui-bar-inherit">
        <a href="Units.aspx" data-icon="back" data-theme="b" class="ui-link ui-btn ui-btn-b ui-icon-back ui-btn-icon-left ui-shadow ui-corner-all" data-role="button" role="button">Back</a>
        <h1 class="ui-title" role="heading" aria-level="1"><span id="ctl00_pageHeaderText">Submit attendance code</span></h1>
    </div>

    <div data-role="content" class="ui-content" role="main">
{notice}
        <div class="ui-body ui-body-inherit ui-corner-all" style="margin-bottom:12px;">
            <p><strong>Course:</strong> {course}</p>
            <p><strong>Activity:</strong> {slot}</p>
            <p><strong>Scheduled:</strong> {time}</p>
            <p><strong>Status:</strong> {status}</p>
        </div>
        <form method="post" data-ajax="false">
            <div class="ui-field-contain">
                <label for="ctl00_ContentPlaceHolder1_txtAttendanceCode">Attendance code</label>
                <input type="text" name="{field}" id="ctl00_ContentPlaceHolder1_txtAttendanceCode" />
            </div>
            <input type="submit" name="ctl00$ContentPlaceHolder1$btnSubmitAttendanceCode" id="ctl00_ContentPlaceHolder1_btnSubmitAttendanceCode" value="Submit code" data-theme="b">
        </form>
    </div>

    <div data-role="footer" class="ui-footer ui-bar-inherit ui-footer-fixed">
        <h4>Always Attend Mock Portal</h4>
    </div>
</div>
</body></html>"##,
        base = escape(base_href),
        notice = notice,
        course = escape(&view.course_code),
        slot = escape(&view.slot_label),
        time = escape(&view.time_label),
        status = status_title(view.status),
        field = CODE_FIELD,
    )
}
